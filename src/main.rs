use anyhow::{anyhow, Context, Result};
use form_score::{
    angle_between, pose::read_keypoints, synthetic::SyntheticSource, Exercise, FormAnalyzer,
    Point, ScoringConfig, Session,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::channel,
        Arc,
    },
};
use structopt::{clap::AppSettings, StructOpt};
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;

#[derive(structopt::StructOpt)]
struct Opt {
    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,

    /// JSON scoring config. When given it replaces the scoring flags.
    #[structopt(short, long)]
    config: Option<PathBuf>,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Score one frame of keypoints given as a JSON array.
    Analyze {
        /// Exercise name, e.g. "squat", "bench press" or "deadlift".
        #[structopt(parse(from_str = Exercise::from_name))]
        exercise: Exercise,

        /// Read keypoints from this file instead of stdin.
        #[structopt(short, long)]
        input: Option<PathBuf>,

        #[structopt(flatten)]
        scoring: ScoringConfig,
    },

    /// Print the angle in degrees at vertex B formed by A and C.
    #[structopt(setting = AppSettings::AllowNegativeNumbers)]
    Angle {
        ax: f32,
        ay: f32,
        bx: f32,
        by: f32,
        cx: f32,
        cy: f32,
    },

    /// Score a stream of synthetic frames and print a session report.
    Simulate {
        #[structopt(parse(from_str = Exercise::from_name))]
        exercise: Exercise,

        /// Number of frames to generate.
        #[structopt(short, long, default_value = "100")]
        frames: usize,

        /// Seed for the synthetic keypoint generator.
        #[structopt(short, long, default_value = "0")]
        seed: u64,

        #[structopt(long)]
        show_progress: bool,

        #[structopt(flatten)]
        scoring: ScoringConfig,
    },
}

fn scoring_config(path: Option<&Path>, flags: ScoringConfig) -> Result<ScoringConfig> {
    match path {
        Some(path) => ScoringConfig::load(path)
            .with_context(|| format!("failed loading scoring config from {}", path.display())),
        None => Ok(flags),
    }
}

fn analyze(analyzer: &FormAnalyzer, exercise: Exercise, input: Option<&Path>) -> Result<()> {
    let keypoints = match input {
        Some(path) => read_keypoints(
            File::open(path).with_context(|| format!("failed opening {}", path.display()))?,
        ),
        None => {
            let stdin = io::stdin();
            let lock = stdin.lock();
            read_keypoints(lock)
        }
    }
    .context("failed reading keypoints")?;

    let analysis = analyzer.analyze(&keypoints, exercise);
    info!(
        message = "analyzed frame",
        %exercise,
        score = analysis.score,
        feedback = analysis.feedback.len()
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&analysis).context("failed serializing analysis")?
    );
    Ok(())
}

/// Generate, score and collect frames on separate threads until `frames`
/// frames are done or Ctrl-C is pressed.
fn simulate(
    analyzer: &FormAnalyzer,
    exercise: Exercise,
    frames: usize,
    seed: u64,
    show_progress: bool,
) -> Result<Session> {
    let running = Arc::new(AtomicBool::new(true));
    let running_ctrl_c = running.clone();

    ctrlc::set_handler(move || {
        running_ctrl_c.store(false, Ordering::SeqCst);
    })
    .context("failed setting Ctrl-C handler")?;

    let pb_frames = if show_progress {
        Some(
            ProgressBar::new_spinner().with_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                    .template("{prefix:.bold.dim} {spinner} {wide_msg}"),
            ),
        )
    } else {
        None
    };

    let (keypoints_tx, keypoints_rx) = channel();
    let (analyses_tx, analyses_rx) = channel();

    let session = crossbeam::thread::scope(|scope| {
        let running_push = running.clone();
        let producer = scope.spawn(move |_| {
            for (frame_num, keypoints) in SyntheticSource::new(seed).take(frames).enumerate() {
                if !running_push.load(Ordering::SeqCst) {
                    info!(frame_num, "interrupted, draining in-flight frames");
                    break;
                }
                keypoints_tx.send((frame_num, keypoints?))?;
            }
            Ok::<_, anyhow::Error>(())
        });

        let scorer = scope.spawn(move |_| {
            while let Ok((frame_num, keypoints)) = keypoints_rx.recv() {
                let analysis = analyzer.analyze(&keypoints, exercise);
                analyses_tx.send((frame_num, analysis))?;
            }
            Ok::<_, anyhow::Error>(())
        });

        let mut session = Session::new();
        while let Ok((frame_num, analysis)) = analyses_rx.recv() {
            debug!(
                frame_num,
                score = analysis.score,
                feedback = analysis.feedback.len()
            );

            if let Some(pb_frames) = pb_frames.as_ref() {
                pb_frames.set_message(format!(
                    "frame {} => score: {}",
                    frame_num, analysis.score
                ));
                pb_frames.inc(1);
            }

            let set_number = u32::try_from(frame_num + 1).context("frame number overflowed u32")?;
            session.record(set_number, exercise, analysis);
        }

        producer
            .join()
            .map_err(|_| anyhow!("frame producer panicked"))??;
        scorer
            .join()
            .map_err(|_| anyhow!("frame scorer panicked"))??;
        Ok::<_, anyhow::Error>(session)
    })
    .map_err(|_| anyhow!("simulation thread panicked"))??;

    if let Some(pb_frames) = pb_frames {
        pb_frames.finish_and_clear();
    }

    Ok(session)
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(opt.log_level),
    )?;

    match opt.command {
        Command::Analyze {
            exercise,
            input,
            scoring,
        } => {
            let analyzer = FormAnalyzer::new(scoring_config(opt.config.as_deref(), scoring)?);
            analyze(&analyzer, exercise, input.as_deref())
        }
        Command::Angle {
            ax,
            ay,
            bx,
            by,
            cx,
            cy,
        } => {
            let angle = angle_between(Point::new(ax, ay)?, Point::new(bx, by)?, Point::new(cx, cy)?)
                .context("failed computing angle")?;
            println!("{:.2}", angle);
            Ok(())
        }
        Command::Simulate {
            exercise,
            frames,
            seed,
            show_progress,
            scoring,
        } => {
            let analyzer = FormAnalyzer::new(scoring_config(opt.config.as_deref(), scoring)?);
            let session = simulate(&analyzer, exercise, frames, seed, show_progress)?;
            let report = session.report()?;
            info!(
                message = "simulation finished",
                %exercise,
                sets = report.total_sets,
                overall_score = ?report.overall_score
            );
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed serializing report")?
            );
            Ok(())
        }
    }
}
