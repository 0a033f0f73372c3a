use pitchlab_core::constants::STORAGE_KEY;
use pitchlab_core::{PitchLabError, PitchState};
use web_sys as web;

fn local() -> pitchlab_core::Result<web::Storage> {
    web::window()
        .ok_or_else(|| PitchLabError::Storage("no window".into()))?
        .local_storage()
        .map_err(|e| PitchLabError::Storage(format!("{:?}", e)))?
        .ok_or_else(|| PitchLabError::Storage("localStorage unavailable".into()))
}

/// Raw stored blob, if any.
pub fn load() -> Option<String> {
    match local().map(|s| s.get_item(STORAGE_KEY)) {
        Ok(Ok(item)) => item,
        Ok(Err(e)) => {
            log::warn!("[panel] storage read failed: {:?}", e);
            None
        }
        Err(e) => {
            log::warn!("[panel] {}", e);
            None
        }
    }
}

pub fn save(state: &PitchState) -> pitchlab_core::Result<()> {
    let json = state.to_json()?;
    local()?
        .set_item(STORAGE_KEY, &json)
        .map_err(|e| PitchLabError::Storage(format!("{:?}", e)))
}
