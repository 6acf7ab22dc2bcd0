/// Elliptic curve keys on secp256k1 and the identities derived from them.
///
/// Provides private keys, compressed public keys, public-key hashes,
/// key pairs and compact ECDSA signatures over 32-byte digests.

pub mod key_pair;
pub mod pkh;
pub mod private_key;
pub mod public_key;
pub mod signature;

pub use key_pair::KeyPair;
pub use pkh::Pkh;
pub use private_key::PrivKey;
pub use public_key::PubKey;
pub use signature::Signature;
