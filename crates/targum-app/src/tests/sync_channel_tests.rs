use std::io::{self, BufReader, Cursor, Read};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use targum_types::{AppEvent, Size, UiEvent};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::io::{read_lines, watch_lines};
use crate::surface::TerminalViewport;

/// Input that stays open until its writer is dropped
struct OpenInput(mpsc::Receiver<()>);

impl Read for OpenInput {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        let _ = self.0.recv();
        Ok(0)
    }
}

#[tokio::test]
async fn test_reader_thread_feeds_the_loop() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    let viewport = TerminalViewport::default();

    let sync_tx = tx.clone_sync();
    let reader_viewport = viewport.clone();
    let reader = thread::spawn(move || {
        let input = Cursor::new("dog\n\n:fly\n:resize 640 480\n:hover\n");
        read_lines(input, &sync_tx, &reader_viewport);
    });

    let mut received = Vec::new();
    for _ in 0..3 {
        let event = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("Timeout - reader thread did not deliver")
            .expect("channel closed");
        received.push(event);
    }
    reader.join().unwrap();

    assert_eq!(
        received,
        vec![
            AppEvent::Selection("dog".to_string()),
            AppEvent::Ui(UiEvent::ViewportResized),
            AppEvent::Ui(UiEvent::HoverEnter),
        ]
    );
    assert_eq!(
        viewport.get(),
        Size {
            width: 640.0,
            height: 480.0
        }
    );
}

#[test]
fn test_reader_stops_when_loop_is_gone() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();
    drop(rx);

    let (_writer, held) = mpsc::channel::<()>();
    let input = BufReader::new(Cursor::new("dog\n").chain(OpenInput(held)));

    // Returns on the failed send instead of reading on
    read_lines(input, &tx.clone_sync(), &TerminalViewport::default());
}

#[test]
fn test_runtime_teardown_with_open_stdin() {
    let (_writer, held) = mpsc::channel::<()>();
    let (done_tx, done_rx) = mpsc::channel();

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap();

        runtime.block_on(async {
            let (tx, _rx) = kanal::bounded_async::<AppEvent>(8);
            let cancel = CancellationToken::new();
            let watcher = tokio::spawn(watch_lines(
                BufReader::new(OpenInput(held)),
                tx,
                TerminalViewport::default(),
                cancel.clone(),
            ));

            tokio::time::sleep(Duration::from_millis(50)).await;
            cancel.cancel();
            watcher.await.unwrap().unwrap();
        });

        drop(runtime);
        done_tx.send(()).unwrap();
    });

    done_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("runtime teardown waited on open stdin");
}
