// Line-oriented console front end.
//
// Reads commands from stdin, forwards them to the app event loop and prints
// every UiUpdate it receives. Logging goes to a file, so stdout is ours.

pub mod input;
pub mod render;

use std::io::BufRead;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::protocol::{UiUpdate, UserCommand};

const PROMPT: &str = "draftwise> ";

/// Spawn a thread reading stdin lines into a channel.
///
/// A plain OS thread rather than a tokio blocking task: a pending stdin read
/// cannot be cancelled and must not hold up runtime shutdown.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    line_rx
}

/// Run the console until the user quits, stdin closes or the app exits.
pub async fn run(
    ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let line_rx = spawn_stdin_reader();
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(b"draftwise - type 'help' for commands\n")
        .await?;
    run_with(line_rx, ui_rx, cmd_tx, &mut stdout).await
}

/// Console loop over arbitrary line input and output.
pub async fn run_with<W: AsyncWrite + Unpin>(
    mut line_rx: mpsc::Receiver<String>,
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    out: &mut W,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(update) => {
                        out.write_all(render::render(&update).as_bytes()).await?;
                        out.write_all(PROMPT.as_bytes()).await?;
                        out.flush().await?;
                    }
                    None => {
                        debug!("UI channel closed, leaving console");
                        break;
                    }
                }
            }

            line = line_rx.recv() => {
                let Some(line) = line else {
                    info!("stdin closed, quitting");
                    let _ = cmd_tx.send(UserCommand::Quit).await;
                    break;
                };
                match input::parse_command(&line) {
                    Ok(Some(UserCommand::Quit)) => {
                        let _ = cmd_tx.send(UserCommand::Quit).await;
                        break;
                    }
                    Ok(Some(cmd)) => {
                        if cmd_tx.send(cmd).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        out.write_all(PROMPT.as_bytes()).await?;
                        out.flush().await?;
                    }
                    Err(e) => {
                        out.write_all(format!("error: {e}\n{PROMPT}").as_bytes()).await?;
                        out.flush().await?;
                    }
                }
            }
        }
    }
    Ok(())
}
