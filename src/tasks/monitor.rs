use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use crate::config::EngineConfig;
use crate::simulation::artifacts::Artifact;
use crate::simulation::buffer::SampleBuffer;
use crate::simulation::cycle::{CardiacCycleSimulator, Phase, Sample};
use crate::simulation::params::PhysiologicalParameters;
use crate::tasks::alarm::DiagnosisAlarm;
use crate::tasks::recorder::SampleRecord;
use crate::utils::timing::FrameClock;

/// Mensagens que podem ser enviadas para o monitor
#[derive(Debug)]
pub enum MonitorMessage {
    /// Novos parâmetros fisiológicos (não reinicia o ciclo)
    SetParameters(PhysiologicalParameters),
    /// Artefato transitório
    Artifact(Artifact),
    /// Encerra o monitor
    Shutdown,
}

/// Resumo devolvido quando o monitor encerra
#[derive(Debug, Clone)]
pub struct MonitorReport {
    pub frames: u64,
    pub beats: u64,
    pub alarms: u32,
    pub final_params: PhysiologicalParameters,
    pub buffer: SampleBuffer,
}

/// Tarefa do monitor: conduz o simulador a cada quadro
pub struct MonitorTask<R: Rng = StdRng> {
    simulator: CardiacCycleSimulator<R>,
    params: PhysiologicalParameters,
    /// Artefato ativo e o instante em que expira
    artifact: Option<(Artifact, Instant)>,
    alarm: DiagnosisAlarm,
    frame_period: Duration,
    phase_tx: watch::Sender<Phase>,
    sample_tx: Option<Sender<SampleRecord>>,
    frames: u64,
    simulated_ms: f64,
}

impl<R: Rng> MonitorTask<R> {
    /// Cria uma nova tarefa de monitor; os parâmetros iniciais são limitados
    /// às mesmas faixas de `SetParameters`
    pub fn new(
        config: &EngineConfig,
        rng: R,
        params: PhysiologicalParameters,
        frame_period: Duration,
    ) -> Self {
        let params = params.clamped();
        let (phase_tx, _) = watch::channel(Phase::P);
        let mut alarm = DiagnosisAlarm::new();
        alarm.evaluate(&params);
        Self {
            simulator: CardiacCycleSimulator::with_rng(config, rng),
            params,
            artifact: None,
            alarm,
            frame_period,
            phase_tx,
            sample_tx: None,
            frames: 0,
            simulated_ms: 0.0,
        }
    }

    /// Envia cada amostra também para o registrador
    pub fn with_recorder(mut self, tx: Sender<SampleRecord>) -> Self {
        self.sample_tx = Some(tx);
        self
    }

    /// Sinal observável da fase atual (para destacar estruturas anatômicas)
    pub fn subscribe_phase(&self) -> watch::Receiver<Phase> {
        self.phase_tx.subscribe()
    }

    /// Parâmetros efetivos, com o ruído do artefato ativo
    pub fn effective_params(&self) -> PhysiologicalParameters {
        match self.artifact {
            Some((artifact, _)) => PhysiologicalParameters {
                noise_level: self.params.noise_level.max(artifact.kind.noise_level()),
                ..self.params
            },
            None => self.params,
        }
    }

    /// Trata uma mensagem; devolve `false` quando o monitor deve encerrar
    pub fn handle_message(&mut self, msg: MonitorMessage, now: Instant) -> bool {
        match msg {
            MonitorMessage::SetParameters(params) => {
                self.params = params.clamped();
                log::info!("Parâmetros atualizados: {:?}", self.params);
                self.alarm.evaluate(&self.effective_params());
                true
            }
            MonitorMessage::Artifact(artifact) => {
                log::warn!(
                    "Artefato ativo por {:?}: {}",
                    artifact.duration,
                    artifact.kind.label()
                );
                self.artifact = Some((artifact, now + artifact.duration));
                self.alarm.evaluate(&self.effective_params());
                true
            }
            MonitorMessage::Shutdown => {
                log::info!("Monitor encerrando");
                false
            }
        }
    }

    /// Executa um quadro de `delta_ms`
    pub fn frame(&mut self, delta_ms: f64, now: Instant) -> Sample {
        if let Some((artifact, expires)) = self.artifact {
            if now >= expires {
                log::info!("Artefato encerrado: {}", artifact.kind.label());
                self.artifact = None;
                self.alarm.evaluate(&self.params);
            }
        }

        let params = self.effective_params();
        let sample = self.simulator.tick(delta_ms, &params);
        self.frames += 1;
        self.simulated_ms += delta_ms.max(0.0);

        self.phase_tx.send_if_modified(|current| {
            if *current != sample.phase {
                *current = sample.phase;
                true
            } else {
                false
            }
        });
        sample
    }

    /// Loop principal: um tick por quadro até receber `Shutdown`
    pub async fn run(mut self, mut rx: Receiver<MonitorMessage>) -> MonitorReport {
        let mut interval = tokio::time::interval(self.frame_period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut clock = FrameClock::start();

        log::info!("Monitor iniciado, quadro de {:?}", self.frame_period);

        loop {
            tokio::select! {
                msg = rx.recv() => {
                    let keep_going = match msg {
                        Some(msg) => self.handle_message(msg, Instant::now()),
                        None => false,
                    };
                    if !keep_going {
                        break;
                    }
                }
                _ = interval.tick() => {
                    let delta = clock.lap_ms();
                    let sample = self.frame(delta, Instant::now());
                    self.record(sample).await;
                }
            }
        }

        self.report()
    }

    async fn record(&mut self, sample: Sample) {
        let Some(tx) = &self.sample_tx else {
            return;
        };
        let record = SampleRecord {
            timestamp: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S%.3f")
                .to_string(),
            elapsed_ms: self.simulated_ms,
            phase: sample.phase.label(),
            voltage: sample.voltage,
        };
        if tx.send(record).await.is_err() {
            log::warn!("Registrador encerrado; amostras deixam de ser gravadas");
            self.sample_tx = None;
        }
    }

    pub fn report(&self) -> MonitorReport {
        MonitorReport {
            frames: self.frames,
            beats: self.simulator.completed_beats(),
            alarms: self.alarm.alarm_count,
            final_params: self.params,
            buffer: self.simulator.buffer().clone(),
        }
    }

    pub fn simulator(&self) -> &CardiacCycleSimulator<R> {
        &self.simulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::artifacts::ArtifactKind;
    use rand::SeedableRng;
    use tokio::sync::mpsc;

    fn monitor() -> MonitorTask<StdRng> {
        MonitorTask::new(
            &EngineConfig::default(),
            StdRng::seed_from_u64(3),
            PhysiologicalParameters::default(),
            Duration::from_millis(10),
        )
    }

    #[test]
    fn phase_signal_follows_the_cycle() {
        let mut task = monitor();
        let phase_rx = task.subscribe_phase();
        let now = Instant::now();
        for _ in 0..10 {
            task.frame(10.0, now);
        }
        assert_eq!(*phase_rx.borrow(), Phase::PrSegment);
    }

    #[test]
    fn parameter_change_keeps_the_cycle_state() {
        let mut task = monitor();
        let now = Instant::now();
        for _ in 0..3 {
            task.frame(10.0, now);
        }
        let before = *task.simulator().state();
        task.handle_message(
            MonitorMessage::SetParameters(PhysiologicalParameters {
                heart_rate: 120.0,
                ..Default::default()
            }),
            now,
        );
        assert_eq!(*task.simulator().state(), before);
        assert_eq!(task.report().alarms, 1);
    }

    #[test]
    fn artifact_raises_noise_until_it_expires() {
        let mut task = monitor();
        let now = Instant::now();
        task.handle_message(
            MonitorMessage::Artifact(Artifact::new(
                ArtifactKind::LooseElectrode,
                Duration::from_millis(100),
            )),
            now,
        );
        assert_eq!(task.effective_params().noise_level, 9.0);
        assert_eq!(task.report().alarms, 1);

        task.frame(10.0, now + Duration::from_millis(150));
        assert_eq!(task.effective_params().noise_level, 0.0);
    }

    #[test]
    fn initial_parameters_are_clamped() {
        let task = MonitorTask::new(
            &EngineConfig::default(),
            StdRng::seed_from_u64(3),
            PhysiologicalParameters {
                heart_rate: 500.0,
                noise_level: -2.0,
                ..Default::default()
            },
            Duration::from_millis(10),
        );
        assert_eq!(task.effective_params().heart_rate, 200.0);
        assert_eq!(task.report().final_params.noise_level, 0.0);
    }

    #[test]
    fn shutdown_stops_the_loop() {
        let mut task = monitor();
        assert!(!task.handle_message(MonitorMessage::Shutdown, Instant::now()));
    }

    #[tokio::test]
    async fn run_records_samples_until_shutdown() {
        let (tx, rx) = mpsc::channel(8);
        let (rec_tx, mut rec_rx) = mpsc::channel(1024);
        let task = monitor().with_recorder(rec_tx);
        let handle = tokio::spawn(task.run(rx));

        let first = rec_rx.recv().await.expect("primeira amostra");
        assert_eq!(first.phase, "P");

        tx.send(MonitorMessage::Shutdown).await.unwrap();
        let report = handle.await.unwrap();
        assert!(report.frames >= 1);
        assert_eq!(report.buffer.len(), 400);
    }
}
