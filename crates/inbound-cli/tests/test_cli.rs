use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn inbound(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_inbound"))
        .arg("--config-dir")
        .arg(root.join("config"))
        .arg("--data-dir")
        .arg(root.join("data"))
        .args(args)
        .env_remove("GEMINI_API_KEY")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run inbound")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn seed_session(root: &Path) {
    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(
        data_dir.join("session.json"),
        r#"{
          "leads": [
            {"companyName": "Acme Foods", "leadScore": 64, "category": "Food", "contacts": []},
            {"companyName": "Initech Snacks", "leadScore": 88, "category": "Food",
             "contacts": [
               {"contactName": "Jane Roe", "designation": "CMO", "contactLinkedIn": "https://linkedin.com/in/jane"},
               {"contactName": "Sam Poe", "designation": "VP Sales", "contactLinkedIn": "Not found"}
             ]}
          ],
          "query": {"clientName": "Acme Foods", "region": "USA"}
        }"#,
    )
    .unwrap();
}

#[test]
fn init_writes_templates_once() {
    let temp = TempDir::new().unwrap();

    let output = inbound(temp.path(), &["init"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(temp.path().join("config/secret.json").exists());
    assert!(temp.path().join("config/config.toml").exists());

    let again = inbound(temp.path(), &["init"]);
    assert!(again.status.success());
    assert!(stdout(&again).contains("already exists"));
}

#[test]
fn generate_without_key_reports_configuration() {
    let temp = TempDir::new().unwrap();
    inbound(temp.path(), &["init"]);

    let output = inbound(temp.path(), &["generate", "--client", "InnovateTech"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("No Gemini API key configured"));
    assert!(!temp.path().join("data/session.json").exists());
}

#[test]
fn show_lists_leads_by_score() {
    let temp = TempDir::new().unwrap();

    let empty = inbound(temp.path(), &["show"]);
    assert!(empty.status.success());
    assert!(stdout(&empty).contains("No leads yet"));

    seed_session(temp.path());
    let output = inbound(temp.path(), &["show", "--details"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    let initech = text.find("Initech Snacks").unwrap();
    let acme = text.find("  2     64  Acme Foods").unwrap();
    assert!(initech < acme);
    assert!(text.lines().any(|l| l.contains("Jane Roe") && l.contains("Initech Snacks")));
    assert!(text.lines().any(|l| l.contains("Sam Poe") && !l.contains("Initech Snacks")));
    assert!(text.lines().any(|l| l.starts_with("  2     64  Acme Foods") && l.ends_with("Not found")));
}

#[test]
fn export_csv_and_workbook() {
    let temp = TempDir::new().unwrap();
    seed_session(temp.path());

    let csv_path = temp.path().join("out/leads.csv");
    let output = inbound(
        temp.path(),
        &["export", "--format", "csv", "--output", csv_path.to_str().unwrap()],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Exported 3 rows"));
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains("\"Jane Roe\""));

    let xml_path = temp.path().join("out/leads.xml");
    let output = inbound(
        temp.path(),
        &["export", "--format", "xlsx", "--output", xml_path.to_str().unwrap()],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    let xml = fs::read_to_string(&xml_path).unwrap();
    assert!(xml.contains("ss:Name=\"Latest News\""));
}

#[test]
fn clipboard_export_prints_csv() {
    let temp = TempDir::new().unwrap();
    seed_session(temp.path());

    let output = inbound(temp.path(), &["export", "--format", "clipboard"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with("Lead Score,Company Name,"));
}

#[test]
fn clear_forgets_the_session() {
    let temp = TempDir::new().unwrap();
    seed_session(temp.path());

    let output = inbound(temp.path(), &["clear"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!temp.path().join("data/session.json").exists());
    assert!(stdout(&inbound(temp.path(), &["show"])).contains("No leads yet"));
}

#[test]
fn lookalikes_rejects_unknown_rows() {
    let temp = TempDir::new().unwrap();
    seed_session(temp.path());

    let output = inbound(temp.path(), &["lookalikes", "5"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("There is no lead at row 5"));
}

#[test]
fn config_set_and_show() {
    let temp = TempDir::new().unwrap();

    let output = inbound(temp.path(), &["config", "set", "grounding", "off"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let stored = fs::read_to_string(temp.path().join("config/config.toml")).unwrap();
    assert!(stored.contains("grounding = false"));

    let bad = inbound(temp.path(), &["config", "set", "colour", "blue"]);
    assert!(!bad.status.success());
    assert!(stderr(&bad).contains("unknown config key"));

    let shown = stdout(&inbound(temp.path(), &["config", "show"]));
    assert!(shown.contains("grounding = false"));
    assert!(shown.contains("missing"));
}

#[test]
fn docs_render_to_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("GUIDE.md");

    let output = inbound(temp.path(), &["docs", "--output", path.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    let doc = fs::read_to_string(path).unwrap();
    assert!(doc.starts_with("# Inbound"));
    assert!(doc.contains("## Prompt architecture"));
}
