use crate::domain::csv::HEADER;

const REFINE_SYSTEM_PROMPT: &str = "Eres un experto en QA y análisis funcional.";
const GENERATE_SYSTEM_PROMPT: &str = "Eres un experto en QA y pruebas de software.";

pub struct PromptEngine;

impl PromptEngine {
    pub fn refine_system_prompt() -> &'static str {
        REFINE_SYSTEM_PROMPT
    }

    pub fn generate_system_prompt() -> &'static str {
        GENERATE_SYSTEM_PROMPT
    }

    /// Turn a free-form description into an explicit list of QA conditions
    pub fn build_refine_prompt(description: &str) -> String {
        format!(
            r#"Analiza la siguiente descripción funcional escrita de forma libre y conviértela en una lista estructurada y exhaustiva de reglas, restricciones, validaciones, condiciones y comportamientos esperados que sirvan para diseñar escenarios de prueba.

No resumas, no inventes, no omitas y no escribas casos de prueba todavía.

Incluye, una por línea:
- Validaciones explícitas o implícitas.
- Reglas de negocio.
- Requisitos funcionales y no funcionales.
- Condiciones lógicas.
- Restricciones.

Texto original:
{}"#,
            description.trim()
        )
    }

    /// Ask for the six-column CSV, quoting and value sets spelled out
    pub fn build_generate_prompt(refined_description: &str) -> String {
        let columns = HEADER
            .iter()
            .map(|name| format!("\"{}\"", name))
            .collect::<Vec<_>>()
            .join(",");

        format!(
            r#"A partir de la siguiente descripción funcional, genera casos de prueba detallados en formato CSV para importar en TestRail, con exactamente estas columnas:
{columns}

- Title: nombre conciso y claro del caso.
- Preconditions: siempre presentes. Si no son explícitas, deduce condiciones realistas. No uses "Ninguna", "N/A" ni valores vacíos.
- Steps: pasos numerados (1., 2., 3.) en infinitivo, separados por saltos de línea dentro del mismo campo.
- Expected Result: resultado exacto que debe verificar el tester.
- Type: uno de Functional, Negative, Performance, Security, Usability.
- Priority: uno de High, Medium, Low.

Cada campo debe ir entre comillas dobles. Usa correctamente tildes y ñ.
Devuelve solo el CSV, sin explicaciones, sin bloques de código y sin texto adicional.

Descripción funcional:
{description}"#,
            columns = columns,
            description = refined_description.trim()
        )
    }
}
