use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use yaml_rust2::{Yaml, YamlEmitter, YamlLoader};

use crate::config::ConfigError;

const INCLUDE_DIRECTIVE: &str = "!include";

/// Loads a YAML file, resolving `!include <relative path>` lines.
///
/// Included documents are merged first, in order, and the including file's
/// own keys override them. Hashes merge key by key, any other value replaces.
pub fn load_yaml_with_includes(path: &Path) -> Result<Yaml, ConfigError> {
    let mut chain = Vec::new();
    let yaml = process_includes_recursive(&path.to_path_buf(), &mut chain)?;
    debug!("Resolved configuration from {:?}", path);
    Ok(yaml)
}

/// Renders a resolved document back to YAML text so it can be handed to serde.
pub fn emit_yaml(yaml: &Yaml) -> Result<String, ConfigError> {
    let mut out_str = String::new();
    {
        let mut emitter = YamlEmitter::new(&mut out_str);
        emitter.dump(yaml)?;
    }
    Ok(out_str)
}

fn process_includes_recursive(path: &PathBuf, chain: &mut Vec<PathBuf>) -> Result<Yaml, ConfigError> {
    if chain.contains(path) {
        return Err(ConfigError::IncludeCycle(path.clone()));
    }
    chain.push(path.clone());

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let base_path = path.parent().unwrap_or(Path::new(""));

    let (includes, rest): (Vec<&str>, Vec<&str>) = contents
        .lines()
        .partition(|&line| line.trim().starts_with(INCLUDE_DIRECTIVE));

    let mut merged_includes: Option<Yaml> = None;
    for line in includes {
        let include_path = line.trim().trim_start_matches(INCLUDE_DIRECTIVE).trim();
        let included = process_includes_recursive(&base_path.join(include_path), chain)?;
        merged_includes = Some(match merged_includes {
            Some(acc) => merge_yaml(&acc, &included),
            None => included,
        });
    }

    let rest_yamls = YamlLoader::load_from_str(&rest.join("\n"))?;
    let merged_rest = rest_yamls
        .into_iter()
        .reduce(|acc, doc| merge_yaml(&acc, &doc));

    chain.pop();

    match (merged_includes, merged_rest) {
        (Some(includes), Some(rest)) => Ok(merge_yaml(&includes, &rest)),
        (Some(includes), None) => Ok(includes),
        (None, Some(rest)) => Ok(rest),
        (None, None) => Err(ConfigError::Empty(path.clone())),
    }
}

fn merge_yaml(base: &Yaml, override_yaml: &Yaml) -> Yaml {
    match (base, override_yaml) {
        (Yaml::Hash(base_hash), Yaml::Hash(override_hash)) => {
            let mut result = base_hash.clone();
            for (key, value) in override_hash {
                match base_hash.get(key) {
                    Some(base_value) => {
                        result.insert(key.clone(), merge_yaml(base_value, value));
                    }
                    None => {
                        result.insert(key.clone(), value.clone());
                    }
                }
            }
            Yaml::Hash(result)
        }
        (_, override_value) => override_value.clone(),
    }
}
