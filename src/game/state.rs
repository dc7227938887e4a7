use strum_macros::Display;

/// Coarse state of the game. The loop controller only distinguishes `Playing` from the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Default)]
pub enum GameState {
    /// Waiting for the start key.
    #[default]
    Menu,
    Playing,
    /// Scripted intermission between levels; sprites are frozen.
    Cutscene,
    /// Out of lives.
    Highscores,
}

/// What the next reset should restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetKind {
    /// A life was lost: positions and ghost release restart, pellets stay eaten.
    Life,
    /// The board was cleared: pellets come back for the next level.
    Level,
    /// Score, lives and level go back to their starting values.
    NewGame,
    /// Requested by the host: everyone back to their starts and the house release starts
    /// over for the level. Pellets, score and lives stay.
    Restart,
}
