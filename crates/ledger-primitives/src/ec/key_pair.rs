use crate::ec::{Pkh, PrivKey, PubKey};

/// A private key together with its public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub priv_key: PrivKey,
    pub pub_key: PubKey,
}

impl KeyPair {
    pub fn from_priv_key(priv_key: PrivKey) -> Self {
        let pub_key = priv_key.to_pub_key();
        KeyPair { priv_key, pub_key }
    }

    pub fn random() -> Self {
        Self::from_priv_key(PrivKey::random())
    }

    pub fn pkh(&self) -> Pkh {
        self.pub_key.pkh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pub_key_matches_priv_key() {
        let key_pair = KeyPair::random();
        assert_eq!(key_pair.pub_key, key_pair.priv_key.to_pub_key());
        assert_eq!(key_pair.pkh(), Pkh::from_pub_key(&key_pair.pub_key));
    }
}
