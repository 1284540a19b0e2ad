use quant_engine::{LineQueue, SERVICE_LOGGER, run};
use quant_observe::LoggerRegistry;

fn main() -> anyhow::Result<()> {
    let registry = LoggerRegistry::new();
    let queue = LineQueue::stdin(registry.acquire(SERVICE_LOGGER));
    run(&registry, queue)
}
