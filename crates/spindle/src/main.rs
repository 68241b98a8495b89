use clap::Parser;
use spindle::{
    Easing, MenuConfig, PanelConfig, Progress, RadialMenu, SLOT_COUNT, SlotLabel, SlotSpec,
    ToggleController,
};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const MAX_FPS: i64 = 1_000;

#[derive(Parser, Debug)]
#[command(name = "spindle", version, about = "Trace radial menu transitions", long_about = None)]
struct Cli {
    /// Steps to replay in order: open, close, toggle, select:N
    #[arg(required = true)]
    steps: Vec<Step>,

    /// Simulated frame rate
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=MAX_FPS))]
    fps: u32,

    /// Transition duration in milliseconds
    #[arg(short = 'd', long, default_value_t = 500)]
    duration_ms: u64,

    /// Easing curve (linear, ease-in-out, ease-in, ease-out, ...)
    #[arg(short = 'e', long, default_value_t = Easing::EaseInOut)]
    easing: Easing,

    /// Comma separated slot labels
    #[arg(short = 'l', long, value_delimiter = ',')]
    labels: Vec<String>,

    /// Print every slot on every frame, not just the settled layout
    #[arg(short = 'f', long)]
    frames: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Open,
    Close,
    Toggle,
    Select(usize),
}

#[derive(Debug, Error)]
enum StepError {
    #[error("unknown step '{0}'")]
    Unknown(String),
    #[error("invalid slot in '{0}'")]
    BadSlot(String),
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Step::Open),
            "close" => Ok(Step::Close),
            "toggle" => Ok(Step::Toggle),
            other => other
                .strip_prefix("select:")
                .ok_or_else(|| StepError::Unknown(s.to_string()))?
                .parse()
                .map(Step::Select)
                .map_err(|_| StepError::BadSlot(s.to_string())),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.labels.len() > SLOT_COUNT {
        anyhow::bail!("at most {} labels can be given", SLOT_COUNT);
    }

    let duration = Duration::from_millis(cli.duration_ms);
    let config = MenuConfig {
        duration,
        easing: cli.easing,
        ..MenuConfig::default()
    };
    let specs = (0..SLOT_COUNT).map(|i| {
        let label = cli
            .labels
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("Slot {i}"));
        Some(SlotSpec::new(label))
    });
    let menu = RadialMenu::new(config, specs)?
        .with_label_sink(|label: &SlotLabel| println!("  heading: {label}"));
    let panel = PanelConfig {
        duration,
        ..PanelConfig::default()
    };
    let mut toggle = ToggleController::new(menu, panel);
    let frame = Duration::from_secs(1) / cli.fps;

    print_layout(&toggle);
    for step in cli.steps {
        println!("> {}", describe(step));
        if !apply(&mut toggle, step) {
            println!("  ignored");
            continue;
        }
        if let Some(transition) = toggle.menu().transition() {
            println!(
                "  {} transition led by slot {}, rotating {}, radius {:.1}",
                transition.layout(),
                transition.reference(),
                transition.rotation(),
                transition.radius()
            );
        }
        run(&mut toggle, frame, cli.frames);
        print_layout(&toggle);
    }
    Ok(())
}

fn describe(step: Step) -> String {
    match step {
        Step::Open => "open".to_string(),
        Step::Close => "close".to_string(),
        Step::Toggle => "toggle".to_string(),
        Step::Select(i) => format!("select {i}"),
    }
}

fn apply(toggle: &mut ToggleController, step: Step) -> bool {
    match step {
        Step::Open if toggle.is_open() => false,
        Step::Close if !toggle.is_open() => false,
        Step::Open | Step::Close | Step::Toggle => toggle.on_activate(),
        Step::Select(i) => toggle.select_slot(i),
    }
}

fn run(toggle: &mut ToggleController, frame: Duration, verbose: bool) {
    let mut count = 0;
    loop {
        let progress = toggle.tick(frame);
        count += 1;
        if verbose {
            let angles: Vec<String> = toggle
                .menu()
                .slots()
                .map(|(i, s)| format!("{i}:{:7.2}", s.angle))
                .collect();
            println!("  frame {count:3} {}", angles.join(" "));
        }
        if progress == Progress::Complete {
            break;
        }
    }
    println!("  settled after {count} frames");
}

fn print_layout(toggle: &ToggleController) {
    let menu = toggle.menu();
    let panel = toggle.panel();
    println!(
        "  {} (selected {}), panel at ({:.1}, {:.1}) size {:.1}x{:.1} opacity {:.2}",
        menu.layout(),
        menu.selected(),
        panel.position.x,
        panel.position.y,
        panel.size.x,
        panel.size.y,
        panel.opacity
    );
    for (i, slot) in menu.slots() {
        println!(
            "  slot {i} {:<12} angle {:6.1} pos ({:7.1}, {:7.1}) scale {:.2} {:?}",
            slot.label.as_str(),
            slot.angle,
            slot.position.x,
            slot.position.y,
            slot.scale.x,
            slot.variant
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_parsing() {
        assert_eq!("open".parse::<Step>().unwrap(), Step::Open);
        assert_eq!("CLOSE".parse::<Step>().unwrap(), Step::Close);
        assert_eq!("select:4".parse::<Step>().unwrap(), Step::Select(4));
        assert!(matches!("select:x".parse::<Step>(), Err(StepError::BadSlot(_))));
        assert!(matches!("spin".parse::<Step>(), Err(StepError::Unknown(_))));
    }

    #[test]
    fn test_cli_parses_steps() {
        let cli =
            Cli::try_parse_from(["spindle", "--easing", "linear", "open", "select:1"]).unwrap();
        assert_eq!(cli.steps, vec![Step::Open, Step::Select(1)]);
        assert_eq!(cli.easing, Easing::Linear);
        assert_eq!(cli.fps, 60);
    }

    #[test]
    fn test_cli_rejects_out_of_range_fps() {
        assert!(Cli::try_parse_from(["spindle", "--fps", "0", "open"]).is_err());
        assert!(Cli::try_parse_from(["spindle", "--fps", "4000000000", "open"]).is_err());

        let cli = Cli::try_parse_from(["spindle", "--fps", "1000", "open"]).unwrap();
        assert!(Duration::from_secs(1) / cli.fps > Duration::ZERO);
    }
}
