/// Panel actions reachable from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelAction {
    Tap,
    ResetTaps,
    SetBpm,
    NudgeUp,
    NudgeDown,
    Quartz,
    FullReset,
    QueryState,
}

#[inline]
pub fn action_for_key(key: &str, shift: bool) -> Option<PanelAction> {
    match key {
        "t" | "T" | " " => Some(PanelAction::Tap),
        "Escape" => Some(PanelAction::ResetTaps),
        "b" | "B" => Some(PanelAction::SetBpm),
        "ArrowUp" | "+" | "=" => Some(PanelAction::NudgeUp),
        "ArrowDown" | "-" | "_" => Some(PanelAction::NudgeDown),
        "0" | "q" | "Q" => Some(PanelAction::Quartz),
        // capital R only
        "R" if shift => Some(PanelAction::FullReset),
        "s" | "S" => Some(PanelAction::QueryState),
        _ => None,
    }
}
