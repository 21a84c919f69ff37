use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;

use simulador_ecg::config::EngineConfig;
use simulador_ecg::ecg::{Condition, generate_trace};
use simulador_ecg::quiz::{generate_question_with, generate_unit_with};
use simulador_ecg::simulation::{ArtifactSimulator, PhysiologicalParameters, diagnose};
use simulador_ecg::tasks::{MonitorMessage, MonitorTask, RecorderTask};
use simulador_ecg::utils::plot;

/// Motor de ECG: traçados, questões, laudos e simulador em tempo real
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Semente para resultados reproduzíveis
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Gera o path SVG de uma condição
    Trace {
        /// Chave da condição (NSR, AFIB, STEMI, ...)
        #[arg(default_value = "NSR")]
        condition: String,
        /// Grava também um documento SVG
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Gera uma questão em JSON
    Question {
        /// Nível de dificuldade
        #[arg(short, long, default_value_t = 1)]
        level: u32,
    },
    /// Gera as lições de uma unidade em JSON
    Unit {
        /// Número da unidade
        #[arg(short, long, default_value_t = 1)]
        number: u32,
        /// Quantidade de lições
        #[arg(short, long, default_value_t = 8)]
        lessons: u32,
    },
    /// Laudo para os parâmetros informados
    Diagnose(ParamArgs),
    /// Executa o simulador em tempo real
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct ParamArgs {
    /// Frequência cardíaca (bpm)
    #[arg(long, default_value_t = 60.0)]
    bpm: f64,
    /// Intervalo PR (ms)
    #[arg(long, default_value_t = 160.0)]
    pr: f64,
    /// Largura do QRS (ms)
    #[arg(long, default_value_t = 80.0)]
    qrs: f64,
    /// Desvio do ST (mm)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    st: f64,
    /// Nível de ruído (0-10)
    #[arg(long, default_value_t = 0.0)]
    noise: f64,
}

impl ParamArgs {
    fn params(&self) -> PhysiologicalParameters {
        PhysiologicalParameters {
            heart_rate: self.bpm,
            pr_interval: self.pr,
            qrs_width: self.qrs,
            st_deviation: self.st,
            noise_level: self.noise,
        }
        .clamped()
    }
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    params: ParamArgs,
    /// Duração da simulação em segundos
    #[arg(short, long, default_value_t = 10)]
    duration: u64,
    /// Período de quadro (ms)
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Arquivo CSV para as amostras
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Gráfico SVG do buffer ao final
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Probabilidade de artefatos a cada verificação (0-100)
    #[arg(short, long, default_value_t = 10)]
    artifact_probability: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configurar logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::default();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match cli.command {
        Command::Trace { condition, svg } => {
            let condition = Condition::from_key(&condition);
            log::info!("{} ({})", condition.name(), condition.category().label());
            let trace = generate_trace(condition, &config, &mut rng);
            if let Some(path) = svg {
                plot::write_trace_svg(&trace, config.viewport_width, config.baseline_y * 2.0, &path)?;
                log::info!("Traçado salvo em {}", path.display());
            }
            println!("{}", trace);
        }
        Command::Question { level } => {
            let question = generate_question_with(level, &config, &mut rng);
            println!("{}", serde_json::to_string_pretty(&question)?);
        }
        Command::Unit { number, lessons } => {
            let lessons = generate_unit_with(number, lessons, &config, &mut rng);
            println!("{}", serde_json::to_string_pretty(&lessons)?);
        }
        Command::Diagnose(args) => {
            println!("{}", diagnose(&args.params()));
        }
        Command::Simulate(args) => simulate(args, &config, rng).await?,
    }

    Ok(())
}

async fn simulate(args: SimulateArgs, config: &EngineConfig, rng: StdRng) -> anyhow::Result<()> {
    let (monitor_tx, monitor_rx) = mpsc::channel(32);
    let mut monitor = MonitorTask::new(
        config,
        rng,
        args.params.params(),
        Duration::from_millis(args.frame_ms.max(1)),
    );

    let recorder = match &args.csv {
        Some(path) => {
            let (sample_tx, sample_rx) = mpsc::channel(1024);
            monitor = monitor.with_recorder(sample_tx);
            Some(tokio::spawn(RecorderTask::new(path).run(sample_rx)))
        }
        None => None,
    };

    // Destaque das estruturas anatômicas conforme a fase
    let mut phase_rx = monitor.subscribe_phase();
    tokio::spawn(async move {
        while phase_rx.changed().await.is_ok() {
            let phase = *phase_rx.borrow_and_update();
            match phase.structure() {
                Some(structure) => log::debug!("Fase {}: {}", phase, structure),
                None => log::debug!("Fase {}", phase),
            }
        }
    });

    let monitor_handle = tokio::spawn(monitor.run(monitor_rx));

    let mut artifacts = ArtifactSimulator::new(
        monitor_tx.clone(),
        args.artifact_probability as f64 / 100.0,
        Duration::from_secs(2),
        Duration::from_millis(1500),
    );
    artifacts.start();

    log::info!("Simulador de ECG iniciado");
    log::info!("Duração da simulação: {} segundos", args.duration);
    log::info!("Laudo inicial: {}", diagnose(&args.params.params()));

    tokio::time::sleep(Duration::from_secs(args.duration)).await;

    artifacts.stop();
    monitor_tx
        .send(MonitorMessage::Shutdown)
        .await
        .context("Falha ao encerrar o monitor")?;
    let report = monitor_handle.await.context("Tarefa do monitor falhou")?;

    if let Some(handle) = recorder {
        handle.await.context("Tarefa de registro falhou")??;
    }
    if let Some(path) = &args.plot {
        plot::render_strip(&report.buffer, path, (800, 200))?;
    }

    log::info!(
        "Simulação concluída: {} quadros, {} batimentos, {} alarmes",
        report.frames,
        report.beats,
        report.alarms
    );
    Ok(())
}
