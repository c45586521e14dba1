use std::sync::{Arc, Mutex};

use act_adapters::cli::{self, exit_code, split_command, CliSink};
use act_adapters::CLI;
use act_core::{define_action, Handler, Runtime};
use serde_json::{json, Value};

define_action! {
    Join {
        name: "join",
        inputs: ["parts: text[]", "sep?: text", "upper?: bool"],
        perform(_ctx, values) {
            let sep = if values.is_set("sep") { values.text("sep")? } else { "," };
            let joined = values.list("parts")?
                               .iter()
                               .filter_map(|p| p.as_str())
                               .collect::<Vec<_>>()
                               .join(sep);
            let upper = values.is_set("upper") && values.flag("upper")?;
            Ok(json!(if upper { joined.to_uppercase() } else { joined }))
        }
    }
}

fn runtime() -> (Arc<Runtime>, Arc<Mutex<Vec<(bool, String)>>>) {
    let rt = Arc::new(Runtime::default());
    rt.register_action(Arc::new(Join::new()), None, None).expect("action");
    let lines = Arc::new(Mutex::new(Vec::new()));
    cli::register(&rt, None, CliSink::Memory(lines.clone())).expect("cli");
    (rt, lines)
}

async fn run(rt: &Arc<Runtime>, argv: &[&str]) -> i32 {
    let (action, args) = split_command(argv.iter().copied()).expect("command");
    let mut handler = Handler::new(rt.clone(), CLI).with_state(args);
    let result = handler.execute(&action, None).await;
    let rendered = handler.output(result, None, true).await;
    exit_code(rendered.as_ref())
}

#[tokio::test]
async fn repeated_options_fill_vector_inputs() {
    let (rt, lines) = runtime();
    let code = run(&rt, &["join", "--parts", "a", "--parts=b", "--sep", "-", "--upper"]).await;
    assert_eq!(code, 0);
    let lines = lines.lock().expect("lock");
    let (is_error, text) = &lines[0];
    assert!(!is_error);
    let body: Value = serde_json::from_str(text).expect("json");
    assert_eq!(body, json!({"data": "A-B"}));
}

#[tokio::test]
async fn json_form_of_a_vector_is_accepted() {
    let (rt, lines) = runtime();
    let code = run(&rt, &["join", r#"--parts=["x", null, "y"]"#]).await;
    assert_eq!(code, 0);
    let body: Value = serde_json::from_str(&lines.lock().expect("lock")[0].1).expect("json");
    assert_eq!(body, json!({"data": "x,y"}));
}

#[tokio::test]
async fn bad_values_go_to_stderr_with_validation_exit_code() {
    let (rt, lines) = runtime();
    let code = run(&rt, &["join", "--parts", "a", "--upper", "maybe"]).await;
    assert_eq!(code, 2);
    let lines = lines.lock().expect("lock");
    assert!(lines[0].0);
    let body: Value = serde_json::from_str(&lines[0].1).expect("json");
    assert_eq!(body["error"]["input"], json!("upper"));
}

#[tokio::test]
async fn unknown_action_exits_with_internal_code() {
    let (rt, _lines) = runtime();
    assert_eq!(run(&rt, &["nope"]).await, 5);
}
