use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

use crate::tasks::monitor::MonitorMessage;

/// Tipos de artefato de eletrodo/músculo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    LooseElectrode,
    MuscleTremor,
    MainsInterference,
    PatientMovement,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::LooseElectrode,
        ArtifactKind::MuscleTremor,
        ArtifactKind::MainsInterference,
        ArtifactKind::PatientMovement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::LooseElectrode => "🔌 Eletrodo solto",
            ArtifactKind::MuscleTremor => "💪 Tremor muscular",
            ArtifactKind::MainsInterference => "📡 Interferência da rede elétrica",
            ArtifactKind::PatientMovement => "🏃 Movimento do paciente",
        }
    }

    /// Nível de ruído imposto enquanto o artefato estiver ativo
    pub fn noise_level(&self) -> f64 {
        match self {
            ArtifactKind::LooseElectrode => 9.0,
            ArtifactKind::MuscleTremor => 4.0,
            ArtifactKind::MainsInterference => 2.0,
            ArtifactKind::PatientMovement => 6.0,
        }
    }
}

/// Artefato transitório enviado ao monitor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub duration: Duration,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, duration: Duration) -> Self {
        Self { kind, duration }
    }
}

/// Simulador de artefatos
pub struct ArtifactSimulator {
    /// Canal para enviar mensagens ao monitor
    monitor_tx: Sender<MonitorMessage>,
    /// Probabilidade de artefato a cada verificação (0.0 - 1.0)
    probability: f64,
    /// Intervalo entre verificações
    check_interval: Duration,
    /// Duração de cada artefato
    artifact_duration: Duration,
    /// Tarefa em execução
    handle: Option<JoinHandle<()>>,
}

impl ArtifactSimulator {
    /// Cria um novo simulador de artefatos
    pub fn new(
        monitor_tx: Sender<MonitorMessage>,
        probability: f64,
        check_interval: Duration,
        artifact_duration: Duration,
    ) -> Self {
        Self {
            monitor_tx,
            probability: probability.clamp(0.0, 1.0),
            check_interval,
            artifact_duration,
            handle: None,
        }
    }

    /// Inicia o simulador
    pub fn start(&mut self) {
        if self.handle.is_some() {
            return;
        }
        let tx = self.monitor_tx.clone();
        let prob = self.probability;
        let interval = self.check_interval;
        let duration = self.artifact_duration;

        self.handle = Some(tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            loop {
                // Esperar intervalo antes da próxima verificação
                tokio::time::sleep(interval).await;

                if !rng.gen_bool(prob) {
                    continue;
                }
                let kind = ArtifactKind::ALL[rng.gen_range(0..ArtifactKind::ALL.len())];
                log::warn!(
                    "[{}] 🚨 Artefato simulado: {}",
                    chrono::Local::now().format("%H:%M:%S"),
                    kind.label()
                );

                if tx
                    .send(MonitorMessage::Artifact(Artifact::new(kind, duration)))
                    .await
                    .is_err()
                {
                    break; // Monitor encerrado
                }
            }
        }));
    }

    /// Força um artefato específico
    pub async fn force_artifact(&self, kind: ArtifactKind) {
        self.monitor_tx
            .send(MonitorMessage::Artifact(Artifact::new(
                kind,
                self.artifact_duration,
            )))
            .await
            .ok();
    }

    /// Para o simulador
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for ArtifactSimulator {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn forced_artifact_reaches_the_monitor() {
        let (tx, mut rx) = mpsc::channel(4);
        let sim = ArtifactSimulator::new(
            tx,
            0.0,
            Duration::from_secs(60),
            Duration::from_millis(500),
        );
        sim.force_artifact(ArtifactKind::MuscleTremor).await;
        match rx.recv().await {
            Some(MonitorMessage::Artifact(a)) => {
                assert_eq!(a.kind, ArtifactKind::MuscleTremor);
                assert_eq!(a.duration, Duration::from_millis(500));
            }
            other => panic!("mensagem inesperada: {:?}", other),
        }
    }

    #[tokio::test]
    async fn start_and_stop() {
        let (tx, _rx) = mpsc::channel(4);
        let mut sim = ArtifactSimulator::new(
            tx,
            1.0,
            Duration::from_millis(5),
            Duration::from_millis(50),
        );
        sim.start();
        assert!(sim.is_running());
        sim.stop();
        assert!(!sim.is_running());
    }

    #[test]
    fn loose_electrode_masks_the_rhythm() {
        assert!(
            ArtifactKind::LooseElectrode.noise_level()
                > crate::simulation::diagnosis::ARTIFACT_NOISE_THRESHOLD
        );
    }
}
