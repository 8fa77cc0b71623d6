use crate::{
    TestkitError,
    config::{KitConfig, TokenConfig, schema::Validate},
    identity::IdentityRegistry,
    log::{Logger, Topic},
    token::TokenVariant,
};
use dft_types::{DecimalAmount, Nat};

///
/// TestKit
///
/// Everything a step needs, built once at start-up and passed by reference.
///

#[derive(Clone, Debug)]
pub struct TestKit {
    config: KitConfig,
    identities: IdentityRegistry,
    logger: Logger,
}

impl TestKit {
    pub fn new(config: KitConfig) -> Result<Self, TestkitError> {
        config.validate().map_err(crate::config::ConfigError::from)?;

        let logger = config.log.logger();
        let identities = IdentityRegistry::from_config(&config)?;

        crate::log!(
            logger,
            Topic::Config,
            Ok,
            "host={} identities={} tokens={}",
            config.host,
            identities.len(),
            config.tokens.len()
        );

        Ok(Self {
            config,
            identities,
            logger,
        })
    }

    pub fn from_toml(config_str: &str) -> Result<Self, TestkitError> {
        Self::new(KitConfig::from_toml(config_str)?)
    }

    #[must_use]
    pub const fn config(&self) -> &KitConfig {
        &self.config
    }

    #[must_use]
    pub const fn identities(&self) -> &IdentityRegistry {
        &self.identities
    }

    pub const fn identities_mut(&mut self) -> &mut IdentityRegistry {
        &mut self.identities
    }

    #[must_use]
    pub const fn logger(&self) -> Logger {
        self.logger
    }

    pub fn token(&self, variant: TokenVariant) -> Result<&TokenConfig, TestkitError> {
        self.config
            .get_token(variant)
            .ok_or(TestkitError::TokenNotConfigured(variant))
    }

    /// Human amount from step text to base units of `variant`.
    pub fn to_base_units(&self, variant: TokenVariant, amount: &str) -> Result<Nat, TestkitError> {
        let token = self.token(variant)?;
        let base = token.to_base_units(amount)?;

        crate::log!(
            self.logger,
            Topic::Amount,
            Debug,
            "{variant}: {amount} -> {} base units @ {} decimals",
            base.0,
            token.decimals
        );

        Ok(base)
    }

    /// Base units of `variant` back to a human amount.
    pub fn to_decimal(
        &self,
        variant: TokenVariant,
        base_units: &Nat,
        precision: Option<u32>,
    ) -> Result<DecimalAmount, TestkitError> {
        Ok(self.token(variant)?.to_decimal(base_units, precision))
    }

    /// Transfer fee charged by `variant` for `amount` base units; zero when no
    /// fee schedule is configured.
    pub fn transfer_fee(&self, variant: TokenVariant, amount: &Nat) -> Result<Nat, TestkitError> {
        match self.token(variant)?.token_fee()? {
            Some(fee) => Ok(fee.calc_transfer_fee(amount)),
            None => {
                crate::log!(self.logger, Topic::Token, Warn, "{variant}: no fee configured");

                Ok(Nat::from(0u64))
            }
        }
    }
}

///
/// TESTS
///
