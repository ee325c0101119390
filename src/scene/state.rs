/// The single externally toggled arrangement of the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MorphState {
    #[default]
    Scattered,
    TreeShape,
}

impl MorphState {
    pub fn from_tree_shape(tree_shape: bool) -> Self {
        if tree_shape {
            MorphState::TreeShape
        } else {
            MorphState::Scattered
        }
    }

    /// Progress value every animator approaches while in this state
    pub fn target_progress(self) -> f32 {
        match self {
            MorphState::Scattered => 0.0,
            MorphState::TreeShape => 1.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            MorphState::Scattered => MorphState::TreeShape,
            MorphState::TreeShape => MorphState::Scattered,
        }
    }

    pub fn is_tree_shape(self) -> bool {
        self == MorphState::TreeShape
    }
}
