//! セッションの永続化
//!
//! ログイン後の user_id / token を設定ディレクトリの session.json に保存する。

use crate::config::Config;
use crate::error::Result;
use count_vision_common::Session;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const SESSION_FILE_NAME: &str = "session.json";

pub fn session_path() -> Result<PathBuf> {
    Ok(Config::config_dir()?.join(SESSION_FILE_NAME))
}

/// セッションを読み込み（ファイルがない・壊れている場合は未ログイン）
pub fn load(path: &Path) -> Session {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return Session::default(),
    };

    match serde_json::from_reader(BufReader::new(file)) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!("セッションファイルを読めません、未ログインとして扱います: {}", e);
            Session::default()
        }
    }
}

pub fn save(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, session)?;
    Ok(())
}

/// セッションファイルを削除（存在しなければ false）
pub fn clear(path: &Path) -> Result<bool> {
    if path.exists() {
        std::fs::remove_file(path)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_logged_out() {
        let dir = tempdir().expect("Failed to create temp dir");
        let session = load(&dir.path().join(SESSION_FILE_NAME));
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_corrupt_file_is_logged_out() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join(SESSION_FILE_NAME);
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load(&path), Session::default());
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("sub").join(SESSION_FILE_NAME);

        let session = Session { user_id: Some("u1".into()), token: Some("t".into()), user: None };
        save(&path, &session).expect("保存失敗");
        assert_eq!(load(&path), session);

        assert!(clear(&path).expect("削除失敗"));
        assert!(!clear(&path).expect("削除失敗"));
        assert!(!load(&path).is_logged_in());
    }
}
