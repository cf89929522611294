//! `.scoped-i18n.json` の読み込み

use std::path::Path;

use super::{
    ConfigError,
    I18nSettings,
};

/// 設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".scoped-i18n.json";

/// `root` 直下の設定ファイルから検証済みの設定を作る
///
/// ファイルが無ければデフォルト設定。書かれていないフィールドもデフォルト値で埋まる。
///
/// # Errors
/// - 読み込み・パースに失敗した場合
/// - [`I18nSettings::validate`] が失敗した場合（全エラーをまとめて返す）
pub fn load_settings(root: &Path) -> Result<I18nSettings, ConfigError> {
    let path = root.join(CONFIG_FILE_NAME);

    let settings = match std::fs::read_to_string(&path) {
        Ok(content) => {
            tracing::debug!("Loading settings from {:?}", path);
            serde_json::from_str::<I18nSettings>(&content)?
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE_NAME, root);
            I18nSettings::default()
        }
        Err(error) => return Err(error.into()),
    };

    settings.validate().map_err(ConfigError::ValidationErrors)?;
    Ok(settings)
}
