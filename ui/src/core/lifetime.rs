//! Ties in-flight requests to the lifetime of the component that owns them.

use std::future::Future;

use futures::future::{select, Either};
use futures::pin_mut;
use tokio_util::sync::CancellationToken;

/// Run `fut` unless `token` is cancelled first. Returns `None` when the owner
/// was torn down, in which case the result must not be applied.
pub async fn until_cancelled<F: Future>(token: &CancellationToken, fut: F) -> Option<F::Output> {
    if token.is_cancelled() {
        return None;
    }

    let cancelled = token.cancelled();
    pin_mut!(fut);
    pin_mut!(cancelled);

    match select(fut, cancelled).await {
        Either::Left((output, _)) if !token.is_cancelled() => Some(output),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn completes_while_alive() {
        let token = CancellationToken::new();
        assert_eq!(block_on(until_cancelled(&token, async { 7 })), Some(7));
    }

    #[test]
    fn drops_result_after_teardown() {
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(block_on(until_cancelled(&token, async { 7 })), None);
    }

    #[test]
    fn cancellation_interrupts_pending_work() {
        let token = CancellationToken::new();
        let pending = futures::future::pending::<u32>();
        let canceller = token.clone();
        let result = block_on(async {
            let guarded = until_cancelled(&token, pending);
            let cancel = async move {
                canceller.cancel();
            };
            futures::join!(guarded, cancel).0
        });
        assert_eq!(result, None);
    }
}
