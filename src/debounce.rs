use std::time::Duration;

use tokio::sync::mpsc;

/// Forward only the latest value of each burst.
///
/// A value is emitted once `window` passes without a newer one arriving.
/// When the input closes, the pending value (if any) is flushed before the
/// output closes too.
pub fn debounce<T: Send + 'static>(
    mut input: mpsc::Receiver<T>,
    window: Duration,
) -> mpsc::Receiver<T> {
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        let mut pending: Option<T> = None;
        loop {
            let Some(value) = pending.take() else {
                match input.recv().await {
                    Some(value) => pending = Some(value),
                    None => break,
                }
                continue;
            };

            match tokio::time::timeout(window, input.recv()).await {
                Ok(Some(newer)) => pending = Some(newer),
                Ok(None) => {
                    let _ = tx.send(value).await;
                    break;
                }
                Err(_) => {
                    if tx.send(value).await.is_err() {
                        break;
                    }
                }
            }
        }
    });

    rx
}
