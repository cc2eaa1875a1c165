//! Line-based interactive chat.
//!
//! Reads one query per line, streams the answer as it arrives and lists the
//! supporting articles when the message ends.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::client::{ChatClient, TurnOutcome};
use crate::models::Article;
use crate::sse::StreamEvent;
use crate::traits::HttpClient;

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplInput {
    Empty,
    Reset,
    Quit,
    Query(String),
}

pub fn parse_line(line: &str) -> ReplInput {
    match line.trim() {
        "" => ReplInput::Empty,
        "/reset" => ReplInput::Reset,
        "/quit" | "/exit" => ReplInput::Quit,
        query => ReplInput::Query(query.to_string()),
    }
}

fn write_articles<W: Write>(out: &mut W, articles: &[Article]) -> std::io::Result<()> {
    if articles.is_empty() {
        return Ok(());
    }
    writeln!(out, "\nSources:")?;
    for (i, article) in articles.iter().enumerate() {
        write!(out, "  [{}] {} (score {:.2})", i + 1, article.title, article.score)?;
        if !article.slug.is_empty() {
            write!(out, " /{}", article.slug)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_event<W: Write>(out: &mut W, event: &StreamEvent) -> std::io::Result<()> {
    match event {
        StreamEvent::Chunk { content, .. } => {
            write!(out, "{}", content)?;
            out.flush()
        }
        StreamEvent::End { resources, .. } => write_articles(out, resources),
        StreamEvent::Complete { .. } | StreamEvent::Error { .. } => Ok(()),
    }
}

/// Run the chat loop until `/quit` or end of input.
pub async fn run_repl<C, R, W>(
    client: &mut ChatClient<C>,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    C: HttpClient,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let query = match parse_line(&line) {
            ReplInput::Empty => continue,
            ReplInput::Quit => break,
            ReplInput::Reset => {
                client.reset_conversation();
                writeln!(out, "(new conversation)")?;
                continue;
            }
            ReplInput::Query(query) => query,
        };

        let mut write_result = Ok(());
        let mut failure = None;
        let outcome = client
            .subscribe(
                &query,
                |event| {
                    if write_result.is_ok() {
                        write_result = write_event(out, &event);
                    }
                },
                |err| failure = Some(err),
            )
            .await;
        write_result?;

        writeln!(out)?;
        if let Some(err) = failure {
            tracing::debug!(?outcome, code = err.error_code(), "turn failed");
            writeln!(out, "error: {}", err)?;
            if outcome == TurnOutcome::TransportFailed {
                writeln!(out, "hint: {}", err.recovery_hint())?;
            }
        }
    }

    Ok(())
}
