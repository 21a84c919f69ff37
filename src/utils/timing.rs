use std::time::Duration;
use tokio::time::Instant;

/// Relógio de quadros: mede o delta real entre ticks do host
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    /// Início do relógio
    started: Instant,
    /// Momento do último quadro
    last: Instant,
    /// Quadros contados
    frames: u64,
}

impl FrameClock {
    /// Cria um novo relógio a partir de agora
    pub fn start() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            started: now,
            last: now,
            frames: 0,
        }
    }

    /// Delta em ms desde o último quadro
    pub fn lap_ms(&mut self) -> f64 {
        self.lap_at(Instant::now())
    }

    /// Delta em ms até `now`; instantes anteriores ao último quadro dão zero
    pub fn lap_at(&mut self, now: Instant) -> f64 {
        let delta = now.saturating_duration_since(self.last);
        if now > self.last {
            self.last = now;
        }
        self.frames += 1;
        duration_ms(delta)
    }

    /// Tempo total desde o início (ms)
    pub fn elapsed_ms(&self) -> f64 {
        duration_ms(self.last.saturating_duration_since(self.started))
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Converte uma duração em milissegundos fracionários
pub fn duration_ms(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}
