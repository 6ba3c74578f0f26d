use std::{path::PathBuf, time::Instant};

use pendulum_rs::{PendulumError, PendulumState};
use settings::ConsoleSettings;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod settings;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("could not read settings")]
    Io(#[from] std::io::Error),
    #[error("could not parse settings")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Pendulum(#[from] PendulumError),
}

fn main() -> Result<(), ConsoleError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!(path = %path.display(), "loading settings");
            ConsoleSettings::load(&path)?
        }
        None => ConsoleSettings::default(),
    };

    let mut pendulum = settings.pendulum.build()?;
    run(&mut pendulum, &settings)
}

fn run(pendulum: &mut PendulumState, settings: &ConsoleSettings) -> Result<(), ConsoleError> {
    let print_every = settings.print_every.max(1);
    let mut elapsed = 0.0;
    let mut last = Instant::now();

    for step in 0..settings.steps {
        let delta_time = match settings.time_step {
            Some(time_step) => time_step,
            None => {
                let now = Instant::now();
                let delta = (now - last).as_secs_f64();
                last = now;
                delta
            }
        };

        match pendulum.advance(delta_time) {
            Ok(()) => elapsed += delta_time,
            // Only a diverged result depends on the frame delta; with wall-clock
            // stepping the next delta differs.
            Err(err @ PendulumError::NumericalInstability { determinant })
                if determinant.is_nan() && settings.time_step.is_none() =>
            {
                warn!(step, %err, "skipping frame");
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        if step % print_every == 0 {
            let angles = pendulum.angles();
            println!("{:>10.4} {:>12.6} {:>12.6}", elapsed, angles.x, angles.y);
        }
    }

    info!(
        elapsed,
        energy = pendulum.total_energy(),
        "simulation finished"
    );

    Ok(())
}
