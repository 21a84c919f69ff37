/// Largura lógica do viewport dos traçados
pub const VIEWPORT_WIDTH: f64 = 800.0;
/// Linha de base vertical (coordenadas SVG: menor é para cima)
pub const BASELINE_Y: f64 = 100.0;
/// Margem extra gerada além do viewport
pub const COVERAGE_MARGIN: f64 = 50.0;
/// Capacidade padrão do buffer de amostras do simulador
pub const SAMPLE_BUFFER_CAPACITY: usize = 400;

/// Configuração do motor de síntese
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Largura lógica do traçado
    pub viewport_width: f64,
    /// Valor Y da linha de base
    pub baseline_y: f64,
    /// Margem de segurança além do viewport
    pub coverage_margin: f64,
    /// Chance de uma extrassístole por batimento (0.0 - 1.0)
    pub pvc_chance: f64,
    /// Chance de uma questão do tipo "escolha o traçado" (0.0 - 1.0)
    pub pick_trace_chance: f64,
    /// Tamanho do buffer circular de amostras
    pub sample_buffer_capacity: usize,
    /// Unidades de amostra por nível de ruído
    pub noise_scale: f64,
    /// Unidades de amostra por mm de desvio do ST
    pub st_scale: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            baseline_y: BASELINE_Y,
            coverage_margin: COVERAGE_MARGIN,
            pvc_chance: 0.4,
            pick_trace_chance: 0.4,
            sample_buffer_capacity: SAMPLE_BUFFER_CAPACITY,
            noise_scale: 5.0,
            st_scale: 5.0,
        }
    }
}

impl EngineConfig {
    /// Posição do cursor a partir da qual a geração pode parar
    pub fn coverage_limit(&self) -> f64 {
        self.viewport_width + self.coverage_margin
    }
}
