use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture() -> PathBuf {
    let path = repo_root().join("fixtures").join("nested.json");
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn run_json(args: &[&str]) -> Value {
    let exe = assert_cmd::cargo_bin!("nautilus-cli");
    let out = Command::new(exe)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&out).expect("stdout is JSON")
}

fn node<'a>(out: &'a Value, id: &str) -> &'a Value {
    out["nodes"]
        .as_array()
        .expect("nodes array")
        .iter()
        .find(|n| n["id"] == id)
        .unwrap_or_else(|| panic!("node {id} missing"))
}

#[test]
fn cli_layout_sizes_containers_and_keeps_edges() {
    let fixture = fixture();
    let out = run_json(&["layout", fixture.to_string_lossy().as_ref()]);

    assert_eq!(
        out["containers"],
        serde_json::json!(["B", "A", "P", "__root__"])
    );

    // C1/C2 are 120x40 in a TB chain: 120 + 2*20 wide, 40 + 50 + 40 + 2*20 high.
    let p = node(&out, "P");
    assert_eq!(p["width"], 160.0);
    assert_eq!(p["height"], 170.0);
    assert_eq!(p["style"]["width"], 160.0);

    // B lays out LR, so its x -> x2 edge runs along the x axis.
    let b = node(&out, "B");
    assert_eq!(b["width"], 172.0 * 2.0 + 50.0 + 40.0);

    // A and P share the top rank, separated by the document's node spacing.
    let a = node(&out, "A");
    let gap = p["position"]["x"].as_f64().unwrap()
        - (a["position"]["x"].as_f64().unwrap() + a["width"].as_f64().unwrap());
    assert_eq!(gap, 40.0);

    // Unknown host fields survive; the root sentinel parent is dropped.
    assert_eq!(node(&out, "x")["type"], "task");
    assert_eq!(node(&out, "A")["data"]["label"], "Outer");
    assert!(node(&out, "y").get("parentId").is_none());

    let text = fs::read_to_string(&fixture).expect("read fixture");
    let input: Value = serde_json::from_str(&text).expect("fixture JSON");
    assert_eq!(out["edges"], input["edges"]);
}

#[test]
fn cli_select_uses_document_selection() {
    let fixture = fixture();
    let out = run_json(&["select", fixture.to_string_lossy().as_ref()]);
    assert_eq!(out["containers"], serde_json::json!(["P"]));
    assert!(node(&out, "A").get("width").is_none());
}

#[test]
fn cli_select_flag_overrides_document_selection() {
    let fixture = fixture();
    let out = run_json(&["select", "--select", "x", fixture.to_string_lossy().as_ref()]);
    assert_eq!(out["containers"], serde_json::json!(["B"]));
}

#[test]
fn cli_hierarchy_reports_depths() {
    let fixture = fixture();
    let out = run_json(&["hierarchy", fixture.to_string_lossy().as_ref()]);
    let entries = out.as_array().expect("array");
    let depth_of = |id: &str| {
        entries
            .iter()
            .find(|e| e["id"] == id)
            .map(|e| e["depth"].clone())
    };
    assert_eq!(depth_of("A"), Some(Value::from(0)));
    assert_eq!(depth_of("P"), Some(Value::from(0)));
    assert_eq!(depth_of("B"), Some(Value::from(1)));
    assert_eq!(depth_of("x"), None);
}

#[test]
fn cli_project_buckets_by_wire_container_id() {
    let fixture = fixture();
    let out = run_json(&["project", fixture.to_string_lossy().as_ref()]);

    let root = out["__root__"].as_array().expect("root bucket");
    assert_eq!(root.len(), 1);
    assert_eq!(root[0]["id"], "e-x-y::projected");
    assert_eq!(root[0]["source"], "A");
    assert_eq!(root[0]["target"], "y");
    assert_eq!(root[0]["originalSource"], "x");

    assert_eq!(out["B"][0]["source"], "x");
    assert_eq!(out["P"][0]["target"], "C2");
}

#[test]
fn cli_direction_flag_and_config_file_are_merged() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("config.json");
    fs::write(&config, r#"{ "margin": 0, "direction": "BT" }"#).expect("write config");

    let input = tmp.path().join("flat.json");
    fs::write(
        &input,
        r#"{ "nodes": [
              { "id": "a", "width": 10, "height": 10 },
              { "id": "b", "width": 10, "height": 10 }
            ],
            "edges": [ { "id": "ab", "source": "a", "target": "b" } ] }"#,
    )
    .expect("write input");

    let out = run_json(&[
        "layout",
        "--config",
        config.to_string_lossy().as_ref(),
        "--direction",
        "LR",
        input.to_string_lossy().as_ref(),
    ]);
    assert_eq!(node(&out, "a")["position"]["x"], 0.0);
    assert_eq!(node(&out, "b")["position"]["x"], 60.0);
    assert_eq!(node(&out, "a")["position"]["y"], 0.0);
}

#[test]
fn cli_rejects_bad_input() {
    let fixture = fixture();
    let exe = assert_cmd::cargo_bin!("nautilus-cli");
    Command::new(exe)
        .args([
            "layout",
            "--direction",
            "diagonal",
            fixture.to_string_lossy().as_ref(),
        ])
        .assert()
        .failure();

    let exe = assert_cmd::cargo_bin!("nautilus-cli");
    Command::new(exe).args(["--bogus"]).assert().code(2);
}

#[test]
fn cli_rejects_the_top_level_id_as_a_node_id() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("reserved.json");
    fs::write(
        &input,
        r#"{ "nodes": [ { "id": "__root__" }, { "id": "kid", "parentId": "__root__" } ] }"#,
    )
    .expect("write input");

    let exe = assert_cmd::cargo_bin!("nautilus-cli");
    Command::new(exe)
        .args(["layout", input.to_string_lossy().as_ref()])
        .assert()
        .code(1);
}
