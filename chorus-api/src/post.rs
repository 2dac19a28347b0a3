#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct PostId(pub u64);

/// What a request post is asking for
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Goal {
    Money {
        target: u64,
        raised: u64,
        #[serde(default)]
        milestones: Vec<Milestone>,
    },
    Job {
        title: String,
    },
    Travel {
        destination: String,
    },
    Other {
        description: String,
    },
}

impl Goal {
    /// Percentage of the target raised so far, capped at 100. Only money goals
    /// have a measurable progress.
    pub fn progress_percent(&self) -> Option<u8> {
        match self {
            Goal::Money { target, raised, .. } if *target > 0 => {
                let pct = (u128::from(*raised) * 100) / u128::from(*target);
                Some(pct.min(100) as u8)
            }
            _ => None,
        }
    }

    pub fn reached_milestones(&self) -> Vec<&Milestone> {
        match self {
            Goal::Money {
                raised, milestones, ..
            } => milestones.iter().filter(|m| m.reached(*raised)).collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Milestone {
    pub title: String,
    pub amount: u64,
}

impl Milestone {
    pub fn reached(&self, raised: u64) -> bool {
        raised >= self.amount
    }
}
