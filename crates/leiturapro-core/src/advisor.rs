//! Pedagogical advisor: turns classroom records into model requests and
//! model responses into reports.
//!
//! The two operations fail differently. A student analysis always yields
//! something to show (a fixed fallback text on failure), while passage
//! generation returns its error so the caller can offer a retry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument, warn};

use crate::error::{AdvisorError, ValidationError};
use crate::model::{Assessment, CriteriaTally, ReadingLevel, Student};
use crate::store::EntityStore;
use crate::traits::{extract_json_block, GenerateRequest, GenerativeModel, GroundingSource};

/// Text shown when the analysis request fails.
pub const ANALYSIS_FALLBACK: &str = "Erro ao conectar com o serviço de pesquisa do Google.";

/// Text shown when the model answers with nothing.
pub const ANALYSIS_UNAVAILABLE: &str = "Análise indisponível.";

/// How many of the latest assessments are sent with an analysis request.
pub const RECENT_HISTORY_LEN: usize = 3;

const NOT_AVAILABLE: &str = "N/A";

/// What the advisor knows about a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    /// Grade label of the student's class, if assigned.
    pub grade_level: Option<String>,
    pub reading_level: ReadingLevel,
}

impl StudentProfile {
    pub fn from_store(store: &EntityStore, student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            grade_level: store.class_of(student).map(|c| c.grade_level.clone()),
            reading_level: student.reading_level,
        }
    }
}

/// Narrative analysis of one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentAnalysis {
    pub text: String,
    pub sources: Vec<GroundingSource>,
    /// `true` when `text` is the fixed fallback message.
    #[serde(default)]
    pub degraded: bool,
}

impl StudentAnalysis {
    fn fallback() -> Self {
        Self {
            text: ANALYSIS_FALLBACK.to_string(),
            sources: Vec::new(),
            degraded: true,
        }
    }
}

/// A generated reading passage with comprehension questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPassage {
    pub grade_level: String,
    pub title: String,
    pub content: String,
    pub questions: Vec<String>,
    pub sources: Vec<GroundingSource>,
}

impl ReadingPassage {
    /// Plain-text rendering for copying into other documents.
    pub fn to_plain_text(&self) -> String {
        format!(
            "{}\n\n{}\n\nPerguntas:\n{}",
            self.title,
            self.content,
            self.questions.join("\n")
        )
    }
}

/// The JSON object the passage request asks for.
#[derive(Debug, Deserialize)]
struct PassageBody {
    title: String,
    content: String,
    questions: Vec<String>,
}

/// Builds requests for a [`GenerativeModel`] and interprets the answers.
#[derive(Clone)]
pub struct PedagogyAdvisor {
    model: Arc<dyn GenerativeModel>,
    model_name: String,
}

impl PedagogyAdvisor {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        let model_name = model.default_model().to_string();
        Self { model, model_name }
    }

    /// Analyze a student's recent progress.
    ///
    /// Never fails: any model error yields [`ANALYSIS_FALLBACK`] with no
    /// sources.
    #[instrument(skip_all, fields(backend = self.model.name()))]
    pub async fn analyze_student(
        &self,
        profile: &StudentProfile,
        history: &[Assessment],
    ) -> StudentAnalysis {
        let request = GenerateRequest {
            model: self.model_name.clone(),
            prompt: analysis_prompt(profile, history),
            grounded_search: true,
            response_schema: None,
            thinking_budget: Some(0),
        };

        match self.model.generate(&request).await {
            Ok(response) => {
                debug!(
                    sources = response.sources.len(),
                    latency_ms = response.latency_ms,
                    "student analysis ready"
                );
                let text = if response.text.trim().is_empty() {
                    ANALYSIS_UNAVAILABLE.to_string()
                } else {
                    response.text
                };
                StudentAnalysis {
                    text,
                    sources: response.sources,
                    degraded: false,
                }
            }
            Err(e) => {
                warn!(error = %e, "student analysis failed, using fallback");
                StudentAnalysis::fallback()
            }
        }
    }

    /// Generate a reading passage for a grade level and topic.
    #[instrument(skip_all, fields(backend = self.model.name()))]
    pub async fn generate_reading_passage(
        &self,
        grade_level: &str,
        topic: &str,
    ) -> Result<ReadingPassage, AdvisorError> {
        if grade_level.trim().is_empty() {
            return Err(ValidationError::MissingField("grade_level").into());
        }
        if topic.trim().is_empty() {
            return Err(ValidationError::MissingField("topic").into());
        }

        let request = GenerateRequest {
            model: self.model_name.clone(),
            prompt: passage_prompt(grade_level, topic),
            grounded_search: true,
            response_schema: Some(passage_schema()),
            thinking_budget: None,
        };

        let response = self
            .model
            .generate(&request)
            .await
            .map_err(AdvisorError::Provider)?;
        let body = parse_passage(&response.text)?;

        Ok(ReadingPassage {
            grade_level: grade_level.trim().to_string(),
            title: body.title,
            content: body.content,
            questions: body.questions,
            sources: response.sources,
        })
    }
}

/// One line of the analysis prompt per assessment.
fn history_line(a: &Assessment) -> String {
    let tally = a.criteria.tally();
    let notes = if a.notes.trim().is_empty() {
        "-"
    } else {
        a.notes.trim()
    };
    format!(
        "Data: {}, WPM: {}, Precisão: {}% | Fluência: {}/{}, Decodificação: {}/{}, \
         Compreensão: {}/{}, Matemática: {}/{}. Notas: L:{}, M:{}. Obs: {}",
        a.date,
        a.wpm,
        a.accuracy,
        tally.fluency,
        CriteriaTally::FLUENCY_ITEMS,
        tally.decoding,
        CriteriaTally::DECODING_ITEMS,
        tally.comprehension,
        CriteriaTally::COMPREHENSION_ITEMS,
        tally.math,
        CriteriaTally::MATH_ITEMS,
        a.comprehension,
        a.math_score,
        notes,
    )
}

/// The analysis prompt. Only the [`RECENT_HISTORY_LEN`] latest assessments
/// are included, newest first.
pub fn analysis_prompt(profile: &StudentProfile, history: &[Assessment]) -> String {
    let mut recent: Vec<&Assessment> = history.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    let recent_history = recent
        .iter()
        .take(RECENT_HISTORY_LEN)
        .map(|a| history_line(a))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Atue como um especialista pedagógico multidisciplinar.\n\
         Analise o progresso do aluno abaixo e, usando informações atualizadas sobre \
         práticas pedagógicas recentes, forneça um relatório.\n\n\
         Aluno: {name}\n\
         Série: {grade}\n\
         Nível de Leitura Atual: {level}\n\n\
         Histórico recente:\n{history}\n\n\
         Estrutura (Markdown):\n\
         1. **Desempenho**: Síntese atualizada.\n\
         2. **Insights da Pesquisa**: Baseie-se em tendências educacionais modernas.\n\
         3. **Sugestões Práticas**: 3 atividades baseadas em evidências científicas recentes.\n",
        name = profile.name,
        grade = profile.grade_level.as_deref().unwrap_or(NOT_AVAILABLE),
        level = profile.reading_level,
        history = if recent_history.is_empty() {
            "Nenhuma avaliação registrada."
        } else {
            recent_history.as_str()
        },
    )
}

pub fn passage_prompt(grade_level: &str, topic: &str) -> String {
    format!(
        "Gere um material de leitura pedagógico para o nível: {}.\n\
         O tema é: {}. Utilize fatos reais e atualizados da pesquisa na web para \
         fundamentar o texto.\n\
         O material deve conter um título, o texto e 3 perguntas de compreensão.",
        grade_level.trim(),
        topic.trim()
    )
}

/// Response schema for passage generation. All three fields are required.
pub fn passage_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "content": { "type": "STRING" },
            "questions": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["title", "content", "questions"]
    })
}

/// Parse a passage response strictly. Partial data is an error.
fn parse_passage(text: &str) -> Result<PassageBody, AdvisorError> {
    let payload = extract_json_block(text);
    if payload.is_empty() {
        return Err(AdvisorError::EmptyResponse);
    }

    let body: PassageBody = serde_json::from_str(payload)
        .map_err(|e| AdvisorError::MalformedPassage(e.to_string()))?;

    if body.title.trim().is_empty() {
        return Err(AdvisorError::MalformedPassage("title is empty".into()));
    }
    if body.content.trim().is_empty() {
        return Err(AdvisorError::MalformedPassage("content is empty".into()));
    }
    Ok(body)
}
