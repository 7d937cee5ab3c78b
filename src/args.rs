use clap::{Parser, ValueEnum};
use sitemap_promoter::SelectionMode;

#[derive(Parser, Debug)]
#[command(name = "sitemap-promoter")]
#[command(about = "Posts a blog entry from a sitemap to Bluesky")]
#[command(version)]
pub struct Args {
    /// How to pick the post from the sitemap
    #[arg(short, long, value_enum, default_value_t = ModeArg::Random)]
    pub mode: ModeArg,

    /// Shorthand for --mode latest
    #[arg(long, conflicts_with = "mode")]
    pub latest: bool,

    /// Compose the post and log it without publishing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Random,
    Latest,
}

impl Args {
    pub fn selection_mode(&self) -> SelectionMode {
        match (self.latest, self.mode) {
            (true, _) | (false, ModeArg::Latest) => SelectionMode::Latest,
            (false, ModeArg::Random) => SelectionMode::Random,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_random() {
        let args = Args::parse_from(["sitemap-promoter"]);
        assert_eq!(args.selection_mode(), SelectionMode::Random);
        assert!(!args.dry_run);
    }

    #[test]
    fn latest_flag_and_mode_agree() {
        let args = Args::parse_from(["sitemap-promoter", "--latest"]);
        assert_eq!(args.selection_mode(), SelectionMode::Latest);
        let args = Args::parse_from(["sitemap-promoter", "--mode", "latest", "--dry-run"]);
        assert_eq!(args.selection_mode(), SelectionMode::Latest);
        assert!(args.dry_run);
    }
}
