use crate::hat::Hat;

use super::config::Config;

#[derive(Debug, Clone)]
pub struct PoiseData {
    pub(crate) config: Config,
    pub(crate) hat: Hat,
}

impl PoiseData {
    pub(crate) const fn new(config: Config, hat: Hat) -> Self {
        Self { config, hat }
    }

    pub(crate) const fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) const fn hat(&self) -> &Hat {
        &self.hat
    }
}
