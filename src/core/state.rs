use crate::domain::model::CountryProfile;
use serde::Serialize;

/// Where the current lookup cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Searching,
    Found,
    NeighborsLoading,
    NeighborsReady,
    NeighborsEmpty,
    NotFound,
}

impl Phase {
    /// True once the cycle has nothing left in flight.
    pub fn is_settled(self) -> bool {
        matches!(
            self,
            Phase::Idle | Phase::NeighborsReady | Phase::NeighborsEmpty | Phase::NotFound
        )
    }
}

/// Transitions the workflow feeds into [`LookupState::reduce`]. Completion actions carry the
/// generation of the request that produced them.
#[derive(Debug, Clone)]
pub enum Action {
    EditQuery(String),
    BeginSearch {
        generation: u64,
    },
    PrimaryFound {
        generation: u64,
        profile: CountryProfile,
    },
    PrimaryFailed {
        generation: u64,
        message: String,
    },
    BeginNeighbors {
        generation: u64,
    },
    NeighborsSettled {
        generation: u64,
        neighbors: Vec<CountryProfile>,
    },
    SelectNeighbor {
        code: String,
    },
}

/// Immutable snapshot of everything the view needs.
///
/// Invariants kept by `reduce`:
/// - `neighbors` is empty whenever `primary` is `None`;
/// - `selected` always names a code present in `neighbors`;
/// - after a search settles, exactly one of `primary` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupState {
    pub query: String,
    pub phase: Phase,
    pub primary: Option<CountryProfile>,
    pub neighbors: Vec<CountryProfile>,
    pub selected: Option<String>,
    pub error: Option<String>,
    #[serde(skip)]
    generation: u64,
}

impl Default for LookupState {
    fn default() -> Self {
        Self {
            query: String::new(),
            phase: Phase::Idle,
            primary: None,
            neighbors: Vec::new(),
            selected: None,
            error: None,
            generation: 0,
        }
    }
}

impl LookupState {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn selected_neighbor(&self) -> Option<&CountryProfile> {
        let code = self.selected.as_deref()?;
        self.neighbor(code)
    }

    pub fn neighbor(&self, code: &str) -> Option<&CountryProfile> {
        self.neighbors
            .iter()
            .find(|n| n.code.eq_ignore_ascii_case(code))
    }

    /// Computes the next snapshot, or `None` when the action is stale or does not apply.
    pub fn reduce(&self, action: &Action) -> Option<LookupState> {
        match action {
            Action::EditQuery(text) => {
                if *text == self.query {
                    return None;
                }
                Some(LookupState {
                    query: text.clone(),
                    ..self.clone()
                })
            }
            Action::BeginSearch { generation } => {
                if *generation <= self.generation {
                    return None;
                }
                // The previous result or error stays visible until this search settles.
                Some(LookupState {
                    phase: Phase::Searching,
                    generation: *generation,
                    ..self.clone()
                })
            }
            Action::PrimaryFound {
                generation,
                profile,
            } => {
                if !self.is_current(*generation) {
                    return None;
                }
                Some(LookupState {
                    phase: Phase::Found,
                    primary: Some(profile.clone()),
                    neighbors: Vec::new(),
                    selected: None,
                    error: None,
                    ..self.clone()
                })
            }
            Action::PrimaryFailed {
                generation,
                message,
            } => {
                if !self.is_current(*generation) {
                    return None;
                }
                Some(LookupState {
                    phase: Phase::NotFound,
                    primary: None,
                    neighbors: Vec::new(),
                    selected: None,
                    error: Some(message.clone()),
                    ..self.clone()
                })
            }
            Action::BeginNeighbors { generation } => {
                if !self.is_current(*generation) || self.primary.is_none() {
                    return None;
                }
                Some(LookupState {
                    phase: Phase::NeighborsLoading,
                    ..self.clone()
                })
            }
            Action::NeighborsSettled {
                generation,
                neighbors,
            } => {
                if !self.is_current(*generation) || self.primary.is_none() {
                    return None;
                }
                let phase = if neighbors.is_empty() {
                    Phase::NeighborsEmpty
                } else {
                    Phase::NeighborsReady
                };
                Some(LookupState {
                    phase,
                    neighbors: neighbors.clone(),
                    selected: None,
                    ..self.clone()
                })
            }
            Action::SelectNeighbor { code } => {
                let neighbor = self.neighbor(code)?;
                Some(LookupState {
                    selected: Some(neighbor.code.clone()),
                    ..self.clone()
                })
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}
