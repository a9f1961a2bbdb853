//! Interactive question shell.

use anyhow::Result;
use docqa_rag::RagPipeline;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::error;

/// Read questions until `exit` (case-insensitive) or end of input.
///
/// Each question runs through the pipeline; a pipeline failure prints the
/// fixed initialization-error message and terminates the loop with an
/// error. No state survives between iterations.
pub async fn run(pipeline: &RagPipeline) -> Result<()> {
    let mut editor = DefaultEditor::new()?;

    loop {
        let line = match editor.readline("Faça sua pergunta:\n") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                println!("Saindo...");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.to_lowercase() == "exit" {
            println!("Saindo...");
            return Ok(());
        }
        let _ = editor.add_history_entry(question);

        match pipeline.answer(question).await {
            Ok(answer) => {
                println!(
                    "\nPERGUNTA: {question}\nRESPOSTA: {answer}\n\nCaso queira sair, digite \"exit\".\n"
                );
            }
            Err(e) => {
                error!(error = %e, "answer pipeline failed");
                println!("Não foi possível iniciar o chat. Verifique os erros de inicialização.");
                return Err(e.into());
            }
        }
    }
}
