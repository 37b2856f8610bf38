//! Built-in sample roster, used when no roster file is given.

use std::path::Path;

use anyhow::Result;

use crate::roster::parse_roster_str;
use crate::store::EntityStore;

pub const SAMPLE_ROSTER: &str = r#"# Sample roster for leiturapro.
# Keys are local to this file; dates are quoted YYYY-MM-DD strings.

[[classes]]
key = "1a"
name = "Turma 1A"
grade_level = "1º Ano"
year = 2024

[[classes]]
key = "2b"
name = "Turma 2B"
grade_level = "2º Ano"
year = 2024

[[classes]]
key = "3c"
name = "Turma 3C"
grade_level = "3º Ano"
year = 2024

[[students]]
key = "ana"
name = "Ana Clara Souza"
class = "1a"
reading_level = "Iniciante"

[[students]]
key = "bruno"
name = "Bruno Oliveira"
class = "1a"
reading_level = "Em Desenvolvimento"

[[students]]
key = "carla"
name = "Carla Mendes"
class = "2b"
reading_level = "Intermediário"

[[students]]
key = "davi"
name = "Davi Santos"
class = "2b"
reading_level = "Em Desenvolvimento"

[[students]]
key = "elisa"
name = "Elisa Rocha"
class = "3c"
reading_level = "Avançado"

[[students]]
key = "felipe"
name = "Felipe Almeida"
class = "3c"
reading_level = "Fluente"

[[assessments]]
student = "ana"
date = "2024-02-19"
text_title = "A Casa"
wpm = 18
accuracy = 82
comprehension = 5
math_score = 6
notes = "Reconhece sílabas simples."
criteria.decoding = { recognition = true }
criteria.math = { number_sense = true }

[[assessments]]
student = "ana"
date = "2024-03-18"
text_title = "O Gato Xadrez"
wpm = 24
accuracy = 86
comprehension = 6
math_score = 6
criteria.fluency = { pauses = true }
criteria.decoding = { recognition = true, no_omissions = true }
criteria.math = { number_sense = true, operations = true }

[[assessments]]
student = "bruno"
date = "2024-02-20"
text_title = "A Casa"
wpm = 32
accuracy = 88
comprehension = 6
math_score = 7
criteria.fluency = { rhythm = true }
criteria.decoding = { recognition = true }
criteria.comprehension = { explicit = true }
criteria.math = { number_sense = true, operations = true }

[[assessments]]
student = "bruno"
date = "2024-03-19"
text_title = "O Gato Xadrez"
wpm = 38
accuracy = 91
comprehension = 7
math_score = 7
notes = "Melhorou a segurança na leitura em voz alta."
criteria.fluency = { rhythm = true, security = true }
criteria.decoding = { recognition = true, no_omissions = true }
criteria.comprehension = { explicit = true, main_idea = true }
criteria.math = { number_sense = true, operations = true }

[[assessments]]
student = "carla"
date = "2024-02-21"
text_title = "A Cigarra e a Formiga"
wpm = 58
accuracy = 93
comprehension = 7
math_score = 8
criteria.fluency = { rhythm = true, pauses = true, intonation = true }
criteria.decoding = { recognition = true, no_omissions = true }
criteria.comprehension = { main_idea = true, explicit = true, implicit = true }
criteria.math = { number_sense = true, operations = true, problem_solving = true }

[[assessments]]
student = "carla"
date = "2024-03-20"
text_title = "O Menino Maluquinho"
wpm = 64
accuracy = 95
comprehension = 8
math_score = 8
criteria.fluency = { rhythm = true, pauses = true, intonation = true, security = true }
criteria.decoding = { recognition = true, no_omissions = true, complex_words = true }
criteria.comprehension = { main_idea = true, explicit = true, implicit = true }
criteria.math = { number_sense = true, operations = true, problem_solving = true }

[[assessments]]
student = "davi"
date = "2024-02-22"
text_title = "A Cigarra e a Formiga"
wpm = 41
accuracy = 87
comprehension = 5
math_score = 9
notes = "Troca b/d em palavras novas. Muito bom em cálculo mental."
criteria.decoding = { recognition = true }
criteria.comprehension = { explicit = true }
criteria.math = { number_sense = true, operations = true, problem_solving = true, logic_reasoning = true }

[[assessments]]
student = "davi"
date = "2024-03-21"
text_title = "O Menino Maluquinho"
wpm = 45
accuracy = 89
comprehension = 6
math_score = 9
criteria.fluency = { rhythm = true }
criteria.decoding = { recognition = true, no_omissions = true }
criteria.comprehension = { explicit = true, main_idea = true }
criteria.math = { number_sense = true, operations = true, problem_solving = true, logic_reasoning = true, geometry = true }

[[assessments]]
student = "elisa"
date = "2024-02-23"
text_title = "Reinações de Narizinho"
wpm = 88
accuracy = 97
comprehension = 9
math_score = 7
criteria.fluency = { rhythm = true, pauses = true, intonation = true, security = true }
criteria.decoding = { recognition = true, no_omissions = true, complex_words = true }
criteria.comprehension = { main_idea = true, explicit = true, implicit = true, inference = true }
criteria.math = { number_sense = true, operations = true }

[[assessments]]
student = "elisa"
date = "2024-03-22"
text_title = "O Pequeno Príncipe"
wpm = 94
accuracy = 98
comprehension = 9
math_score = 8
notes = "Faz inferências com facilidade."
criteria.fluency = { rhythm = true, pauses = true, intonation = true, security = true }
criteria.decoding = { recognition = true, no_omissions = true, complex_words = true }
criteria.comprehension = { main_idea = true, explicit = true, implicit = true, inference = true, title_relation = true }
criteria.math = { number_sense = true, operations = true, geometry = true }

[[assessments]]
student = "felipe"
date = "2024-02-26"
text_title = "Reinações de Narizinho"
wpm = 105
accuracy = 99
comprehension = 10
math_score = 9
criteria.fluency = { rhythm = true, pauses = true, intonation = true, security = true }
criteria.decoding = { recognition = true, no_omissions = true, complex_words = true }
criteria.comprehension = { main_idea = true, explicit = true, implicit = true, inference = true, title_relation = true }
criteria.math = { number_sense = true, operations = true, problem_solving = true, logic_reasoning = true }

[[assessments]]
student = "felipe"
date = "2024-03-25"
text_title = "O Pequeno Príncipe"
wpm = 112
accuracy = 99
comprehension = 10
math_score = 10
criteria.fluency = { rhythm = true, pauses = true, intonation = true, security = true }
criteria.decoding = { recognition = true, no_omissions = true, complex_words = true }
criteria.comprehension = { main_idea = true, explicit = true, implicit = true, inference = true, title_relation = true }
criteria.math = { number_sense = true, operations = true, problem_solving = true, logic_reasoning = true, geometry = true }

[[assessments]]
student = "ana"
date = "2024-04-15"
text_title = "Bruxinha Zuzu"
wpm = 29
accuracy = 89
comprehension = 6
math_score = 7
notes = "Começou a ler frases completas sem apoio."
criteria.fluency = { pauses = true, security = true }
criteria.decoding = { recognition = true, no_omissions = true }
criteria.comprehension = { explicit = true }
criteria.math = { number_sense = true, operations = true }

[[assessments]]
student = "carla"
date = "2024-04-17"
text_title = "Marcelo, Marmelo, Martelo"
wpm = 71
accuracy = 96
comprehension = 8
math_score = 9
criteria.fluency = { rhythm = true, pauses = true, intonation = true, security = true }
criteria.decoding = { recognition = true, no_omissions = true, complex_words = true }
criteria.comprehension = { main_idea = true, explicit = true, implicit = true, inference = true }
criteria.math = { number_sense = true, operations = true, problem_solving = true, logic_reasoning = true }
"#;

/// Build a store from [`SAMPLE_ROSTER`].
pub fn sample_store() -> Result<EntityStore> {
    let roster = parse_roster_str(SAMPLE_ROSTER, Path::new("<sample>"))?;
    Ok(roster.into_store()?)
}
