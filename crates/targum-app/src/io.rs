use std::io::{self, BufRead, BufReader};
use std::thread;

use kanal::{AsyncSender, Sender};
use targum_types::{AppEvent, Point, Size, UiEvent};
use tokio_util::sync::CancellationToken;

use crate::surface::TerminalViewport;

/// One parsed input line
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Event(AppEvent),
    /// Terminal viewport changed to this size
    Resize(Size),
}

/// Stand-in for the page: each stdin line is a selection or a `:command`
pub async fn watcher_io(
    event_tx: AsyncSender<AppEvent>,
    viewport: TerminalViewport,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    watch_lines(BufReader::new(io::stdin()), event_tx, viewport, cancel).await
}

/// Read `reader` on its own thread until cancelled.
///
/// Blocking reads never run on the runtime, so shutdown does not wait for
/// the next line. The thread ends with the input or once the loop is gone.
pub async fn watch_lines<R>(
    reader: R,
    event_tx: AsyncSender<AppEvent>,
    viewport: TerminalViewport,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    R: BufRead + Send + 'static,
{
    let tx = event_tx.clone_sync();
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || read_lines(reader, &tx, &viewport))?;

    tracing::info!("Reading selections from stdin (:help for commands)");
    cancel.cancelled().await;
    tracing::info!("Stdin watcher stopping");
    Ok(())
}

/// Blocking line loop feeding the event channel
pub fn read_lines<R: BufRead>(reader: R, tx: &Sender<AppEvent>, viewport: &TerminalViewport) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("Failed to read stdin: {}", e);
                break;
            }
        };

        let event = match parse_line(&line) {
            Ok(Some(Input::Event(event))) => event,
            Ok(Some(Input::Resize(size))) => {
                viewport.set(size);
                AppEvent::Ui(UiEvent::ViewportResized)
            }
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        if tx.send(event).is_err() {
            tracing::debug!("Event loop gone, stdin reader exiting");
            return;
        }
    }

    tracing::info!("Stdin closed");
}

const HELP: &str = "\
commands:
  <text>        look up text
  :close        close button
  :esc          escape key
  :click-out    click outside the popup
  :hover        pointer enters the popup
  :leave        pointer leaves the popup
  :drag X Y     press on the header at X,Y
  :move X Y     move the pointer while dragging
  :drop         release the pointer
  :speak N      speaker button of card N
  :resize W H   viewport is now W by H";

/// Turn one input line into an input. Blank lines yield nothing.
pub fn parse_line(line: &str) -> Result<Option<Input>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(command) = line.strip_prefix(':') else {
        return Ok(Some(Input::Event(AppEvent::Selection(line.to_string()))));
    };

    let mut words = command.split_whitespace();
    let name = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let event = match (name, args.as_slice()) {
        ("help", []) => return Err(HELP.to_string()),
        ("resize", [width, height]) => return Ok(Some(Input::Resize(size(width, height)?))),
        ("close", []) => AppEvent::Ui(UiEvent::CloseClicked),
        ("esc", []) => AppEvent::Ui(UiEvent::Escape),
        ("click-out", []) => AppEvent::Ui(UiEvent::OutsidePointer),
        ("hover", []) => AppEvent::Ui(UiEvent::HoverEnter),
        ("leave", []) => AppEvent::Ui(UiEvent::HoverLeave),
        ("drag", [x, y]) => AppEvent::Ui(UiEvent::DragStart(point(x, y)?)),
        ("move", [x, y]) => AppEvent::Ui(UiEvent::DragMove(point(x, y)?)),
        ("drop", []) => AppEvent::Ui(UiEvent::DragEnd),
        ("speak", [n]) => {
            let n: usize = n.parse().map_err(|_| format!("not a card number: {n}"))?;
            let card = n.checked_sub(1).ok_or("cards are numbered from 1")?;
            AppEvent::SpeakCard(card)
        }
        _ => return Err(format!("unknown command :{command} (try :help)")),
    };

    Ok(Some(Input::Event(event)))
}

fn number(v: &str) -> Result<f64, String> {
    v.parse::<f64>().map_err(|_| format!("not a number: {v}"))
}

fn point(x: &str, y: &str) -> Result<Point, String> {
    Ok(Point {
        x: number(x)?,
        y: number(y)?,
    })
}

fn size(width: &str, height: &str) -> Result<Size, String> {
    let size = Size {
        width: number(width)?,
        height: number(height)?,
    };
    if size.width <= 0.0 || size.height <= 0.0 {
        return Err(format!("viewport must be positive: {width} {height}"));
    }
    Ok(size)
}
