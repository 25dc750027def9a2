//! Hand-off of bridge instructions to chain-write executors.

use std::mem;

use parking_lot::Mutex;
use tokenbridge_primitives::instructions::{MintInstruction, ReleaseInstruction};
use tracing::warn;

use crate::errors::BridgeError;

/// Executor submitting instructions to the chains.
///
/// Instructions are handed over after the bridge state was committed, so a
/// failed submission is retried with the same instruction without touching
/// bridge state. Submission must be idempotent per receipt or nonce.
pub trait InstructionSink {
    fn submit_mint(&self, instruction: &MintInstruction) -> anyhow::Result<()>;

    fn submit_release(&self, instruction: &ReleaseInstruction) -> anyhow::Result<()>;
}

/// Sink buffering instructions in memory until they are drained.
#[derive(Debug, Default)]
pub struct BufferedSink {
    mints: Mutex<Vec<MintInstruction>>,
    releases: Mutex<Vec<ReleaseInstruction>>,
}

impl BufferedSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_mints(&self) -> Vec<MintInstruction> {
        mem::take(&mut *self.mints.lock())
    }

    pub fn take_releases(&self) -> Vec<ReleaseInstruction> {
        mem::take(&mut *self.releases.lock())
    }
}

impl InstructionSink for BufferedSink {
    fn submit_mint(&self, instruction: &MintInstruction) -> anyhow::Result<()> {
        self.mints.lock().push(instruction.clone());
        Ok(())
    }

    fn submit_release(&self, instruction: &ReleaseInstruction) -> anyhow::Result<()> {
        self.releases.lock().push(instruction.clone());
        Ok(())
    }
}

/// Result of relaying a batch of events to an [`InstructionSink`].
#[derive(Debug)]
pub struct RelayOutcome<I> {
    /// Instructions the sink accepted.
    pub submitted: Vec<I>,
    /// Committed instructions the sink refused. They have to be resubmitted
    /// as is, processing the event again would be rejected.
    pub unsubmitted: Vec<I>,
    /// Events the bridge rejected, by position in the batch.
    pub rejected: Vec<(usize, BridgeError)>,
}

impl<I> Default for RelayOutcome<I> {
    fn default() -> Self {
        Self {
            submitted: Vec::new(),
            unsubmitted: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<I> RelayOutcome<I> {
    pub(crate) fn record(&mut self, instruction: I, submitted: anyhow::Result<()>) {
        match submitted {
            Ok(()) => self.submitted.push(instruction),
            Err(err) => {
                warn!(%err, "instruction not handed off");
                self.unsubmitted.push(instruction);
            }
        }
    }
}
