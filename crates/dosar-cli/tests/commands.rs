use dosar_cli::commands::{parse_command, Command};

#[test]
fn plain_input_is_not_a_command() {
    assert!(parse_command("Ce taxe plătesc la înregistrare?").is_none());
    assert!(parse_command("").is_none());
}

#[test]
fn attach_requires_at_least_one_path() {
    assert!(parse_command(":attach").unwrap().is_err());
    assert_eq!(
        parse_command(":attach cerere.pdf statut.pdf").unwrap().unwrap(),
        Command::Attach(vec!["cerere.pdf".to_string(), "statut.pdf".to_string()])
    );
}

#[test]
fn case_has_a_romanian_alias() {
    assert_eq!(parse_command(":case").unwrap().unwrap(), Command::Case);
    assert_eq!(parse_command(":dosar").unwrap().unwrap(), Command::Case);
}

#[test]
fn audio_accepts_only_on_off() {
    assert_eq!(
        parse_command(":audio on").unwrap().unwrap(),
        Command::Audio(true)
    );
    assert_eq!(
        parse_command(":audio off").unwrap().unwrap(),
        Command::Audio(false)
    );
    assert!(parse_command(":audio").unwrap().is_err());
    assert!(parse_command(":audio loud").unwrap().is_err());
}

#[test]
fn export_path_is_optional() {
    assert_eq!(
        parse_command(":export").unwrap().unwrap(),
        Command::Export(None)
    );
    assert_eq!(
        parse_command(":export out.docx").unwrap().unwrap(),
        Command::Export(Some("out.docx".to_string()))
    );
}

#[test]
fn unknown_command_is_an_error() {
    assert!(parse_command(":abracadabra").unwrap().is_err());
}

#[test]
fn quit_aliases() {
    assert_eq!(parse_command(":quit").unwrap().unwrap(), Command::Quit);
    assert_eq!(parse_command(":q").unwrap().unwrap(), Command::Quit);
}
