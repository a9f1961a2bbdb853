//! Prompt assembly.
//!
//! The instructional template is a compatibility surface: the refusal
//! behavior for out-of-context questions is enforced purely by these
//! instructions, so the text must not drift.

use crate::document::SearchResult;

/// The fixed instructional prompt, with `{contexto}` and `{pergunta}`
/// placeholders.
pub const PROMPT_TEMPLATE: &str = r#"
CONTEXTO:
{contexto}

REGRAS:
- Responda somente com base no CONTEXTO.
- Se a informação não estiver explicitamente no CONTEXTO, responda:
  "Não tenho informações necessárias para responder sua pergunta."
- Nunca invente ou use conhecimento externo.
- Nunca produza opiniões ou interpretações além do que está escrito.

EXEMPLOS DE PERGUNTAS FORA DO CONTEXTO:
Pergunta: "Qual é a capital da França?"
Resposta: "Não tenho informações necessárias para responder sua pergunta."

Pergunta: "Quantos clientes temos em 2024?"
Resposta: "Não tenho informações necessárias para responder sua pergunta."

Pergunta: "Você acha isso bom ou ruim?"
Resposta: "Não tenho informações necessárias para responder sua pergunta."

PERGUNTA DO USUÁRIO:
{pergunta}

RESPONDA A "PERGUNTA DO USUÁRIO"
"#;

/// Concatenate retrieved contents with newline separators, preserving
/// retrieval order.
pub fn build_context(results: &[SearchResult]) -> String {
    results.iter().map(|r| r.record.content.as_str()).collect::<Vec<_>>().join("\n")
}

/// Substitute `{contexto}` and `{pergunta}` into the template.
pub fn render(context: &str, question: &str) -> String {
    PROMPT_TEMPLATE.replace("{contexto}", context).replace("{pergunta}", question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Metadata, StoredRecord};

    fn result(id: &str, content: &str) -> SearchResult {
        SearchResult {
            record: StoredRecord {
                id: id.to_string(),
                content: content.to_string(),
                metadata: Metadata::new(),
                embedding: Vec::new(),
            },
            score: 1.0,
        }
    }

    #[test]
    fn context_preserves_retrieval_order() {
        let results = vec![result("DOC-1", "second"), result("DOC-0", "first")];
        assert_eq!(build_context(&results), "second\nfirst");
    }

    #[test]
    fn render_substitutes_both_placeholders() {
        let prompt = render("Alpha Beta Gamma", "What is in the document?");
        assert!(prompt.contains("CONTEXTO:\nAlpha Beta Gamma\n"));
        assert!(prompt.contains("PERGUNTA DO USUÁRIO:\nWhat is in the document?\n"));
        assert!(!prompt.contains("{contexto}"));
        assert!(!prompt.contains("{pergunta}"));
    }

    #[test]
    fn template_keeps_the_refusal_instruction() {
        assert!(PROMPT_TEMPLATE
            .contains("Não tenho informações necessárias para responder sua pergunta."));
    }
}
