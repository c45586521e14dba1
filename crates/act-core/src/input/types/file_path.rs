//! `filePath`: ruta en el sistema de archivos local.
//!
//! El resultado del stat se memoriza en el caché interno del Input bajo la
//! clave `stat` (objeto `ruta → {exists, isDir, size}`), de modo que
//! validaciones repetidas y `setup_from` no vuelven a tocar el disco.

use async_trait::async_trait;
use log::debug;
use serde_json::{json, Map, Value};

use super::{text_of, wrong_type, InputType};
use crate::constants::STAT_CACHE_KEY;
use crate::errors::{codes, ActionError};
use crate::input::validation::fail;
use crate::input::{Input, InputValue, PropertyTable};

#[derive(Debug, Clone, Copy, Default)]
pub struct FilePathType;

async fn stat(input: &Input, path: &str) -> Value {
    let mut memo = match input.cache_get(STAT_CACHE_KEY) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    if let Some(hit) = memo.get(path) {
        return hit.clone();
    }
    debug!("filepath:stat input={} path={path}", input.name());
    let entry = match tokio::fs::metadata(path).await {
        Ok(meta) => json!({"exists": true, "isDir": meta.is_dir(), "size": meta.len()}),
        Err(_) => json!({"exists": false, "isDir": false, "size": 0}),
    };
    memo.insert(path.to_string(), entry.clone());
    input.cache_set(STAT_CACHE_KEY, Value::Object(memo));
    entry
}

#[async_trait]
impl InputType for FilePathType {
    fn type_name(&self) -> &str {
        "filePath"
    }

    fn register_properties(&self, props: &mut PropertyTable) {
        props.register("exists", false);
        props.register("allowDirectory", false);
        props.register("primitive", false);
    }

    async fn validate_scalar(&self, input: &Input, value: &InputValue) -> Result<(), ActionError> {
        let path = text_of(input, value)?;
        let info = stat(input, &path).await;
        let exists = info["exists"].as_bool().unwrap_or(false);
        let is_dir = info["isDir"].as_bool().unwrap_or(false);
        let props = input.properties();
        if props.flag("exists") && !exists {
            return Err(fail(input, codes::PATH_NOT_FOUND, format!("path '{path}' does not exist")));
        }
        if is_dir && !props.flag("allowDirectory") {
            return Err(fail(input, codes::PATH_IS_DIRECTORY, format!("path '{path}' is a directory")));
        }
        Ok(())
    }

    fn parse_scalar(&self, _input: &Input, raw: &str) -> Result<InputValue, ActionError> {
        Ok(InputValue::Text(raw.to_string()))
    }

    fn serialize_scalar(&self, input: &Input, value: &InputValue) -> Result<String, ActionError> {
        value.as_str().map(str::to_string).ok_or_else(|| wrong_type(input, "path", value))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::input_of;
    use super::*;

    fn temp_file() -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("actflow-{}.txt", uuid::Uuid::new_v4()));
        std::fs::write(&path, b"hola").expect("write temp file");
        path
    }

    #[tokio::test]
    async fn existing_file_passes_and_is_memoised() {
        let path = temp_file();
        let mut input = input_of(FilePathType, "src: filePath", json!({"exists": true}));
        input.set_value(path.to_string_lossy().to_string()).expect("set");
        input.validate().await.expect("valid");

        let memo = input.cache_get(STAT_CACHE_KEY).expect("stat cached");
        let key = path.to_string_lossy().to_string();
        assert_eq!(memo[key.as_str()]["size"], json!(4));

        // el stat memorizado sigue siendo válido aunque el archivo desaparezca
        std::fs::remove_file(&path).expect("cleanup");
        input.validate().await.expect("served from cache");
    }

    #[tokio::test]
    async fn missing_path_and_directories() {
        let mut input = input_of(FilePathType, "src: filePath", json!({"exists": true}));
        input.set_value("/definitely/not/here.txt").expect("set");
        assert_eq!(input.validate().await.unwrap_err().code(), codes::PATH_NOT_FOUND);

        let dir = std::env::temp_dir().to_string_lossy().to_string();
        let mut dir_input = input_of(FilePathType, "src: filePath", json!({}));
        dir_input.set_value(dir.clone()).expect("set");
        assert_eq!(dir_input.validate().await.unwrap_err().code(), codes::PATH_IS_DIRECTORY);

        let mut allowed = input_of(FilePathType, "src: filePath", json!({"allowDirectory": true}));
        allowed.set_value(dir).expect("set");
        allowed.validate().await.expect("directory allowed");
    }
}
