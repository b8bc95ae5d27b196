use {
    herald_pipeline::{ChannelRunner, Error as PipelineError, OutputPlugin, PipelinePack},
    tokio::sync::mpsc,
    tracing::{error, info, warn},
};

use crate::input::MessageReader;

/// Per-output inbound channel capacity.
const CHANNEL_CAPACITY: usize = 64;

/// Counters reported once the input is exhausted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub messages: u64,
    pub skipped: u64,
    pub recycled: u64,
    pub errors: u64,
}

/// Feed every message from `reader` to every output and wait for all
/// outputs to drain.
///
/// Each output runs on its own task and consumes its channel one message
/// at a time. Reading stops at end of input or on Ctrl-C; closing the
/// channels then lets the outputs finish what they already received.
pub async fn dispatch(
    reader: &mut MessageReader,
    outputs: Vec<(String, Box<dyn OutputPlugin>)>,
) -> anyhow::Result<Summary> {
    let (recycle_tx, mut recycle_rx) = mpsc::unbounded_channel();
    let recycled = tokio::spawn(async move {
        let mut count = 0u64;
        while recycle_rx.recv().await.is_some() {
            count += 1;
        }
        count
    });

    let mut senders = Vec::with_capacity(outputs.len());
    let mut tasks = Vec::with_capacity(outputs.len());
    for (name, plugin) in outputs {
        let (tx, mut runner) = ChannelRunner::channel(CHANNEL_CAPACITY);
        senders.push((name.clone(), tx));
        let task = tokio::spawn({
            let name = name.clone();
            async move {
                info!(output = %name, plugin = plugin.name(), "output started");
                let result = plugin.run(&mut runner).await;
                (result, runner.error_count())
            }
        });
        tasks.push((name, task));
    }

    let mut summary = Summary::default();
    loop {
        let next = tokio::select! {
            next = reader.next_message() => next?,
            Ok(()) = tokio::signal::ctrl_c() => {
                info!("interrupted, draining outputs");
                None
            },
        };
        let Some(message) = next else { break };

        for (name, tx) in &senders {
            let pack = PipelinePack::new(summary.messages, message.clone())
                .with_recycler(recycle_tx.clone());
            if tx.send(pack).await.is_err() {
                warn!(output = %name, "output stopped accepting messages");
            }
        }
        summary.messages += 1;
    }

    drop(senders);
    drop(recycle_tx);

    for (name, task) in tasks {
        match task.await {
            Ok((result, errors)) => {
                summary.errors += errors;
                if let Err(e) = result {
                    error!(output = %name, error = %e, "output failed");
                }
            },
            Err(join) => {
                // A panicked output loses its counters; count the task itself.
                summary.errors += 1;
                let e = PipelineError::plugin(name.as_str(), join);
                error!(output = %name, error = %e, "output failed");
            },
        }
    }
    summary.recycled = recycled.await?;
    summary.skipped = reader.skipped();
    Ok(summary)
}
