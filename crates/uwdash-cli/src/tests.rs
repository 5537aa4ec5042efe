use super::*;
use uwdash_core::options::Catalog;
use uwdash_feeds::LabelCategory;

#[test]
fn parses_render_command() {
    let cli = Cli::try_parse_from(["uwdash-cli", "render", "campus-events"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Render { ref id, pretty: false } if id == "campus-events"
    ));
    assert!(cli.blocks.is_none());
}

#[test]
fn parses_render_all_with_pretty_and_blocks_override() {
    let cli = Cli::try_parse_from([
        "uwdash-cli",
        "render-all",
        "--pretty",
        "--blocks",
        "/tmp/blocks.yaml",
    ])
    .expect("expected valid cli args");

    assert!(matches!(cli.command, Commands::RenderAll { pretty: true }));
    assert_eq!(cli.blocks, Some(PathBuf::from("/tmp/blocks.yaml")));
}

#[test]
fn parses_validate_command() {
    let cli = Cli::try_parse_from(["uwdash-cli", "validate"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Validate));
}

#[test]
fn render_requires_block_id() {
    assert!(Cli::try_parse_from(["uwdash-cli", "render"]).is_err());
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["uwdash-cli"]).is_err());
}

#[test]
fn options_accepts_static_and_remote_lists() {
    let cli = Cli::try_parse_from(["uwdash-cli", "options", "country"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Options {
            list: OptionList::Static(Catalog::Country)
        }
    ));

    let cli = Cli::try_parse_from(["uwdash-cli", "options", "news_type"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Options {
            list: OptionList::Story(LabelCategory::StoryType)
        }
    ));

    let cli = Cli::try_parse_from(["uwdash-cli", "options", "sources"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Options {
            list: OptionList::Sources
        }
    ));
}

#[test]
fn options_rejects_unknown_list() {
    let err = options::parse_option_list("planets").unwrap_err();
    assert!(err.contains("unknown option list 'planets'"));
    assert!(Cli::try_parse_from(["uwdash-cli", "options", "planets"]).is_err());
}
