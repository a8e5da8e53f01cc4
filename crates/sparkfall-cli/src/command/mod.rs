use clap::Parser;

use self::play::PlayArg;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    play: PlayArg,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    play::run(&args.play)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = CommandArgs::try_parse_from(["sparkfall", "--seed", "42", "--fps", "30"]).unwrap();
        assert_eq!(args.play.seed, Some(42));
        assert!((args.play.fps - 30.0).abs() < f64::EPSILON);

        let args = CommandArgs::try_parse_from(["sparkfall"]).unwrap();
        assert_eq!(args.play.seed, None);
        assert!((args.play.fps - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_non_positive_fps() {
        assert!(CommandArgs::try_parse_from(["sparkfall", "--fps", "0"]).is_err());
        assert!(CommandArgs::try_parse_from(["sparkfall", "--fps", "-1"]).is_err());
    }
}
