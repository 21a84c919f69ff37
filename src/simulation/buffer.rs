use std::collections::VecDeque;

/// Janela deslizante com as amostras mais recentes (efeito de papel rolando)
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl SampleBuffer {
    /// Buffer vazio com capacidade fixa (mínimo 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Buffer já preenchido com a linha de base
    pub fn filled(capacity: usize, value: f64) -> Self {
        let mut buffer = Self::new(capacity);
        buffer.samples.extend(std::iter::repeat_n(value, buffer.capacity));
        buffer
    }

    /// Adiciona uma amostra, descartando a mais antiga se estiver cheio
    pub fn push(&mut self, sample: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Amostra mais recente
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// Amostras da mais antiga para a mais recente
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Converte para coordenadas de tela (y cresce para baixo a partir de `baseline_y`)
    pub fn screen_points(&self, x_step: f64, baseline_y: f64) -> Vec<(f64, f64)> {
        self.iter()
            .enumerate()
            .map(|(i, v)| (i as f64 * x_step, baseline_y - v))
            .collect()
    }

    /// Atributo `points` de uma polyline SVG
    pub fn polyline(&self, x_step: f64, baseline_y: f64) -> String {
        self.screen_points(x_step, baseline_y)
            .iter()
            .map(|(x, y)| format!("{},{}", x, y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_the_oldest_sample() {
        let mut buffer = SampleBuffer::new(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            buffer.push(v);
        }
        assert_eq!(buffer.to_vec(), vec![2.0, 3.0, 4.0]);
        assert_eq!(buffer.latest(), Some(4.0));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn filled_buffer_keeps_its_length() {
        let mut buffer = SampleBuffer::filled(400, 0.0);
        assert_eq!(buffer.len(), 400);
        buffer.push(10.0);
        assert_eq!(buffer.len(), 400);
        assert_eq!(buffer.latest(), Some(10.0));
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let mut buffer = SampleBuffer::new(0);
        buffer.push(1.0);
        buffer.push(2.0);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.to_vec(), vec![2.0]);
    }

    #[test]
    fn screen_coordinates_flip_the_voltage() {
        let mut buffer = SampleBuffer::new(2);
        buffer.push(0.0);
        buffer.push(60.0);
        assert_eq!(buffer.screen_points(2.0, 100.0), vec![(0.0, 100.0), (2.0, 40.0)]);
        assert_eq!(buffer.polyline(2.0, 100.0), "0,100 2,40");
    }
}
