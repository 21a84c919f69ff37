use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tokio::sync::mpsc::Receiver;

/// Linha do arquivo CSV de amostras
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRecord {
    pub timestamp: String,
    pub elapsed_ms: f64,
    pub phase: &'static str,
    pub voltage: f64,
}

/// Tarefa de registro das amostras em CSV
pub struct RecorderTask {
    /// Caminho do arquivo CSV
    pub path: PathBuf,
}

impl RecorderTask {
    /// Cria uma nova tarefa de registro
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Consome o canal até o monitor encerrar; devolve o número de linhas gravadas
    pub async fn run(self, mut rx: Receiver<SampleRecord>) -> anyhow::Result<u64> {
        let mut writer = csv::Writer::from_path(&self.path)
            .with_context(|| format!("Erro ao abrir arquivo de log {}", self.path.display()))?;
        let mut rows = 0u64;

        while let Some(record) = rx.recv().await {
            writer
                .serialize(&record)
                .context("Erro ao escrever no arquivo de log")?;
            rows += 1;
        }

        writer.flush().context("Erro ao finalizar o arquivo de log")?;
        log::info!("{} amostras registradas em {}", rows, self.path.display());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn writes_a_header_and_one_row_per_sample() {
        let path = std::env::temp_dir().join(format!("recorder-{}.csv", std::process::id()));
        let (tx, rx) = mpsc::channel(8);
        let recorder = tokio::spawn(RecorderTask::new(&path).run(rx));

        for (i, phase) in ["P", "P", "PR"].into_iter().enumerate() {
            tx.send(SampleRecord {
                timestamp: "2026-01-01 00:00:00.000".to_string(),
                elapsed_ms: i as f64 * 10.0,
                phase,
                voltage: 1.5,
            })
            .await
            .unwrap();
        }
        drop(tx);

        let rows = recorder.await.unwrap().unwrap();
        assert_eq!(rows, 3);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("timestamp,elapsed_ms,phase,voltage"));
        assert_eq!(lines.next(), Some("2026-01-01 00:00:00.000,0.0,P,1.5"));
        assert_eq!(content.lines().count(), 4);
        std::fs::remove_file(&path).ok();
    }
}
