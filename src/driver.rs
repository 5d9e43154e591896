//! Driver that drains an ordered list of optional providers into a report.

use futures::{StreamExt, TryStreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{AggregateError, ErrorPolicy, SourceError, Stage};
use crate::source::{Provider, Tier};

const OUTPUT_TARGET: &str = "output";

/// Drains each configured slot in order and writes its lines.
///
/// For every slot the report holds a header `Source {index}: {kind}`, each
/// produced line verbatim, and a blank separator line. Absent slots are
/// served by the null provider. Slots never interleave: slot N is fully
/// written before slot N+1 is touched.
#[derive(Debug, Clone)]
pub struct Driver {
    slots: Vec<Option<Provider>>,
    error_policy: ErrorPolicy,
}

impl Driver {
    /// Create a new driver over the given slots.
    pub fn new(slots: Vec<Option<Provider>>, error_policy: ErrorPolicy) -> Self {
        Self {
            slots,
            error_policy,
        }
    }

    /// Get the configured slots, absent entries included.
    pub fn slots(&self) -> &[Option<Provider>] {
        &self.slots
    }

    /// Get the error policy.
    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    /// Resolve a slot to a usable provider; absent slots become the null provider.
    pub fn resolve(slot: Option<&Provider>) -> Provider {
        slot.cloned().unwrap_or_else(Provider::null)
    }

    /// Iterate over the resolved providers in slot order.
    pub fn providers(&self) -> impl Iterator<Item = Provider> + '_ {
        self.slots.iter().map(|slot| Self::resolve(slot.as_ref()))
    }

    /// Collect every line of a provider through its richest tier.
    pub async fn drain(provider: &Provider) -> Result<Vec<String>, SourceError> {
        match provider.tier() {
            Tier::Streaming => provider.retrieve_stream().try_collect().await,
            Tier::AsyncBatch => Ok(provider.retrieve_async().await?.to_vec()),
            Tier::Sync => Ok(provider.retrieve()?.to_vec()),
        }
    }

    /// Run every slot and write the report to `out`.
    ///
    /// Under `ErrorPolicy::FastFail` the first failing provider aborts the
    /// run; lines it already produced stay written. Under
    /// `ErrorPolicy::Accumulate` the failing slot is closed with its
    /// separator and the run continues. Write failures always abort.
    pub async fn run<W>(&self, out: &mut W) -> Result<(), AggregateError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let mut errors = Vec::new();

        for (index, provider) in self.providers().enumerate() {
            tracing::info!(
                index,
                source = %provider.id(),
                kind = %provider.kind(),
                tier = %provider.tier(),
                "draining source"
            );

            write_line(out, &format!("Source {index}: {}", provider.kind())).await?;

            if let Err(e) = emit(&provider, out).await {
                if e.stage == Stage::Write || self.error_policy == ErrorPolicy::FastFail {
                    errors.push(e);
                    // Keep whatever was already produced visible.
                    let _ = out.flush().await;
                    return Err(AggregateError { errors });
                }
                tracing::warn!(index, error = %e, "source failed, continuing");
                errors.push(e);
            }

            write_line(out, "").await?;
        }

        out.flush()
            .await
            .map_err(|e| SourceError::new(Stage::Write, OUTPUT_TARGET, e))?;

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AggregateError { errors })
        }
    }
}

/// Write every line of `provider` to `out` as it is produced.
async fn emit<W>(provider: &Provider, out: &mut W) -> Result<(), SourceError>
where
    W: AsyncWrite + Unpin + Send,
{
    match provider.tier() {
        Tier::Streaming => {
            let mut stream = provider.retrieve_stream();
            while let Some(line) = stream.next().await {
                write_line(out, &line?).await?;
            }
        }
        Tier::AsyncBatch => {
            for line in provider.retrieve_async().await?.iter() {
                write_line(out, line).await?;
            }
        }
        Tier::Sync => {
            for line in provider.retrieve()?.iter() {
                write_line(out, line).await?;
            }
        }
    }
    Ok(())
}

async fn write_line<W>(out: &mut W, line: &str) -> Result<(), SourceError>
where
    W: AsyncWrite + Unpin + Send,
{
    let write_error = |e: std::io::Error| SourceError::new(Stage::Write, OUTPUT_TARGET, e);
    out.write_all(line.as_bytes()).await.map_err(write_error)?;
    out.write_all(b"\n").await.map_err(write_error)
}
