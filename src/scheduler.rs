use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::{
    error::PipelineError, memory::HaikuStore, prompts::build_haiku_prompt,
    sensors::SensorReader, services::openai::TextGenerator, text_processor::extract_haiku,
    types::haiku::Haiku,
};

/// Drives read → prompt → generate → extract → persist on a fixed interval.
pub struct Scheduler {
    sensor: Arc<dyn SensorReader>,
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn HaikuStore>,
    interval: Duration,
    max_records: usize,
}

impl Scheduler {
    pub fn new(
        sensor: Arc<dyn SensorReader>,
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn HaikuStore>,
        interval: Duration,
        max_records: usize,
    ) -> Self {
        Self {
            sensor,
            generator,
            store,
            interval,
            max_records,
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs one cycle right away, then one per interval, forever.
    ///
    /// Cycles run inline on this task, so a slow cycle delays the next tick
    /// instead of overlapping it. Ticks missed that way are dropped.
    pub async fn run(self) {
        info!(
            sensor = self.sensor.name(),
            interval_secs = self.interval.as_secs(),
            "Haiku scheduler started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    async fn tick(&self) {
        info!("Reading sensors and generating a haiku");

        match self.run_cycle().await {
            Ok(haiku) => info!(id = %haiku.id, text = %haiku.text, "Haiku cycle complete"),
            Err(e) => error!(stage = e.stage(), error = %e, "Haiku cycle failed"),
        }
    }

    pub async fn run_cycle(&self) -> Result<Haiku, PipelineError> {
        let reading = self.sensor.read();
        info!(
            moisture = reading.moisture,
            illumination = reading.illumination,
            temperature = reading.temperature,
            ph = reading.ph,
            "Raw sensor data"
        );

        let prompt = build_haiku_prompt(&reading);
        debug!("LLM prompt:\n{prompt}");

        let llm_output = self.generator.generate(&prompt).await?;
        debug!("LLM response:\n{llm_output}");

        let text = extract_haiku(&llm_output)?;
        let haiku = Haiku::new(&text, &reading);
        self.store.append(&haiku).await?;

        self.enforce_retention().await;

        Ok(haiku)
    }

    // The haiku is already saved by the time this runs, so failures only warn.
    async fn enforce_retention(&self) {
        if self.max_records == 0 {
            return;
        }

        match self.store.prune(self.max_records).await {
            Ok(0) => {}
            Ok(removed) => info!(removed, keep = self.max_records, "Pruned old haikus"),
            Err(e) => warn!(error = %e, "Failed to prune old haikus"),
        }
    }
}
