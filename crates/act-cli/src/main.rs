use std::sync::Arc;

use act_adapters::cli::{self, exit_code, split_command, CliSink};
use act_adapters::CLI;
use act_core::errors::ActionError;
use act_core::{config, define_action, FrameworkConfig, Handler, Runtime};
use log::debug;
use serde_json::json;

define_action! {
    /// `a * b`; cacheable.
    Multiply {
        name: "multiply",
        inputs: ["a: numeric", "b: numeric"],
        cacheable: true,
        perform(_ctx, values) {
            Ok(json!(values.number("a")? * values.number("b")?))
        }
    }
}

define_action! {
    /// Une `parts` con `sep` (por defecto `,`).
    Join {
        name: "join",
        inputs: ["parts: text[]", "sep?: text"],
        perform(_ctx, values) {
            let sep = if values.is_set("sep") { values.text("sep")? } else { "," };
            let parts = values.list("parts")?
                              .iter()
                              .filter_map(|p| p.as_str())
                              .collect::<Vec<_>>();
            Ok(json!(parts.join(sep)))
        }
    }
}

define_action! {
    /// Cuadrado de `x` vía una acción anidada.
    Square {
        name: "square",
        inputs: ["x: numeric"],
        perform(ctx, values) {
            let x = values.number("x")?;
            ctx.run_nested("multiply", json!({"a": x, "b": x})).await
        }
    }
}

fn build_runtime() -> Result<Arc<Runtime>, ActionError> {
    let runtime = Arc::new(Runtime::with_builtins(FrameworkConfig::from_env()));
    runtime.register_action(Arc::new(Multiply::new()), None, None)?;
    runtime.register_action(Arc::new(Join::new()), None, None)?;
    runtime.register_action(Arc::new(Square::new()), None, None)?;
    cli::register(&runtime, None, CliSink::Std)?;
    Ok(runtime)
}

#[tokio::main]
async fn main() {
    config::init_dotenv();
    env_logger::init();

    // act-cli <accion> [--input valor ...]
    let Some((action, args)) = split_command(std::env::args().skip(1)) else {
        eprintln!("uso: act-cli <accion> [--input valor ...]");
        std::process::exit(1);
    };
    let runtime = match build_runtime() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("[act-cli] runtime: {e}");
            std::process::exit(5);
        }
    };
    debug!("cli:start action={action} args={}", args.args.len());

    let mut handler = Handler::new(runtime, CLI).with_state(args);
    let result = handler.execute(&action, None).await;
    let rendered = handler.output(result, None, true).await;
    std::process::exit(exit_code(rendered.as_ref()));
}
