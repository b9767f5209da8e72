use clap::Parser;
use tagshift::application::{init, rename_tag, ConfigService, ListTagsService, RenameOptions};
use tagshift::cli::{format_rename_report, format_tag_list, Cli, Commands};
use tagshift::domain::MergePolicy;
use tagshift::error::TagshiftError;
use tagshift::infrastructure::FileSystemRepository;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), TagshiftError> {
    match cli.command {
        Commands::Init { path } => init::init(&path),
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("merge_policy = {}", config.merge_policy);
                println!("ignore = {}", config.ignore.join(","));
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: tagshift config [--list | <key> [<value>]]");
                println!("Valid keys: merge_policy, ignore, created");
                Ok(())
            }
        }
        Commands::Tags => {
            let repo = FileSystemRepository::discover()?;
            let tags = ListTagsService::new(repo).execute()?;
            println!("{}", format_tag_list(&tags).trim_end());
            Ok(())
        }
        Commands::Rename {
            from,
            to,
            dry_run,
            merge,
        } => {
            let repo = FileSystemRepository::discover()?;
            let report = rename_tag(
                &repo,
                RenameOptions {
                    from_tag: from,
                    to_tag: to,
                    dry_run,
                    merge_policy: merge.then_some(MergePolicy::Allow),
                },
            )?;
            print!("{}", format_rename_report(&report));
            Ok(())
        }
    }
}
