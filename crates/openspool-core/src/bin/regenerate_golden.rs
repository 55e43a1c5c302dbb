use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use openspool_core::decode;

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        let payload = path.join("payload.json");
        if !path.is_dir() || !payload.exists() {
            continue;
        }
        regenerate_one(&payload, &path.join("expected_profile.json"))?;
    }

    Ok(())
}

fn regenerate_one(payload: &Path, output: &Path) -> Result<(), String> {
    let text = fs::read_to_string(payload)
        .map_err(|err| format!("failed to read {}: {}", payload.display(), err))?;
    let profile = decode(text.trim_end().as_bytes())
        .map_err(|err| format!("decode failed for {}: {}", payload.display(), err))?;
    let mut json = serde_json::to_string(&profile)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    json.push('\n');
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
