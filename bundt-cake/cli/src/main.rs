use {
    bundt_cake_cli::{
        clap_app::{app, CommandName, Error},
        command::process_command,
        config::Config,
        logging::LogConfig,
    },
    std::{process::exit, str::FromStr},
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let default_program_id = bundt_cake_interface::id().to_string();
    let app_matches = app(&default_program_id).get_matches();

    let (sub_command, sub_matches) = app_matches.subcommand();
    let sub_command = CommandName::from_str(sub_command)?;
    let matches = sub_matches.ok_or("missing subcommand")?;

    LogConfig::from_matches(matches).setup();

    let config = Config::new(matches).unwrap_or_else(|err| {
        eprintln!("error: {}", err);
        exit(1);
    });

    match process_command(&sub_command, matches, &config).await {
        Ok(result) => {
            println!("{}", result);
            Ok(())
        }
        Err(err) => {
            eprintln!("error: {}", err);
            exit(1);
        }
    }
}
