//! Certificate signature verification
//!
//! Checks that an issuer's public key signed a subject certificate's exact
//! TBS bytes. Verification dispatches on the issuer key algorithm:
//!
//! - RSA: PKCS#1 v1.5 with the hash declared by the subject, any key size
//! - EC: ECDSA over the declared digest on P-256, P-384 or P-521
//! - DSA: verification of the declared digest
//! - anything else: rejected
//!
//! A signature that does not verify is `Ok(false)`. Only material the
//! primitives cannot parse at all surfaces as a [`SignatureError`].

use crate::models::{Certificate, EcCurve, HashAlgorithm, KeyAlgorithm};
use crate::utils::SignatureError;
use rsa::pkcs1::der::Decode;
use rsa::pkcs1v15;
use rsa::{BigUint, RsaPublicKey};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use signature::hazmat::PrehashVerifier;
use signature::Verifier;
use spki::DecodePublicKey;
use std::fmt::Display;

/// Largest RSA modulus accepted, in bits
const RSA_MAX_MODULUS_BITS: usize = 16384;

/// Verify `subject` against `issuer`, collapsing every failure to `false`
pub fn verify(subject: &Certificate, issuer: &Certificate) -> bool {
    match try_verify(subject, issuer) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(
                subject = %subject.subject,
                issuer = %issuer.subject,
                "signature check rejected: {}",
                e
            );
            false
        }
    }
}

/// Verify `subject` against `issuer`, distinguishing malformed input
pub fn try_verify(subject: &Certificate, issuer: &Certificate) -> Result<bool, SignatureError> {
    let Some(hash) = subject.signature_algorithm.hash else {
        tracing::debug!(
            algorithm = %subject.signature_algorithm,
            "no supported digest for signature algorithm"
        );
        return Ok(false);
    };

    let key = &issuer.public_key;
    match &key.algorithm {
        KeyAlgorithm::Rsa => verify_rsa(hash, &key.key_bytes, subject),
        KeyAlgorithm::Ec(curve) => verify_ecdsa(curve, hash, &key.key_bytes, subject),
        KeyAlgorithm::Dsa => verify_dsa(hash, &key.spki_der, subject),
        KeyAlgorithm::Unknown(oid) => {
            tracing::debug!(oid = %oid, "unsupported public key algorithm");
            Ok(false)
        }
    }
}

fn verify_rsa(
    hash: HashAlgorithm,
    key_bytes: &[u8],
    subject: &Certificate,
) -> Result<bool, SignatureError> {
    let key = rsa_public_key(key_bytes)?;
    let signature = pkcs1v15::Signature::try_from(subject.signature.as_slice())
        .map_err(malformed_signature("RSA"))?;

    let tbs = subject.tbs_der.as_slice();
    let verified = match hash {
        HashAlgorithm::Sha1 => pkcs1v15::VerifyingKey::<Sha1>::new(key).verify(tbs, &signature),
        HashAlgorithm::Sha224 => {
            pkcs1v15::VerifyingKey::<Sha224>::new(key).verify(tbs, &signature)
        }
        HashAlgorithm::Sha256 => {
            pkcs1v15::VerifyingKey::<Sha256>::new(key).verify(tbs, &signature)
        }
        HashAlgorithm::Sha384 => {
            pkcs1v15::VerifyingKey::<Sha384>::new(key).verify(tbs, &signature)
        }
        HashAlgorithm::Sha512 => {
            pkcs1v15::VerifyingKey::<Sha512>::new(key).verify(tbs, &signature)
        }
    };

    Ok(verified.is_ok())
}

/// Decode a PKCS#1 RSAPublicKey without the default modulus cap
fn rsa_public_key(key_bytes: &[u8]) -> Result<RsaPublicKey, SignatureError> {
    let der = rsa::pkcs1::RsaPublicKey::from_der(key_bytes).map_err(malformed_key("RSA"))?;

    RsaPublicKey::new_with_max_size(
        BigUint::from_bytes_be(der.modulus.as_bytes()),
        BigUint::from_bytes_be(der.public_exponent.as_bytes()),
        RSA_MAX_MODULUS_BITS,
    )
    .map_err(malformed_key("RSA"))
}

fn verify_ecdsa(
    curve: &EcCurve,
    hash: HashAlgorithm,
    key_bytes: &[u8],
    subject: &Certificate,
) -> Result<bool, SignatureError> {
    let digest = digest_of(hash, &subject.tbs_der);
    let der_signature = subject.signature.as_slice();

    let verified = match curve {
        EcCurve::P256 => {
            let key = p256::ecdsa::VerifyingKey::from_sec1_bytes(key_bytes)
                .map_err(malformed_key("ECDSA"))?;
            let signature = p256::ecdsa::Signature::from_der(der_signature)
                .map_err(malformed_signature("ECDSA"))?;
            key.verify_prehash(&pad_prehash(digest, 32), &signature)
        }
        EcCurve::P384 => {
            let key = p384::ecdsa::VerifyingKey::from_sec1_bytes(key_bytes)
                .map_err(malformed_key("ECDSA"))?;
            let signature = p384::ecdsa::Signature::from_der(der_signature)
                .map_err(malformed_signature("ECDSA"))?;
            key.verify_prehash(&pad_prehash(digest, 48), &signature)
        }
        EcCurve::P521 => {
            let key = p521::ecdsa::VerifyingKey::from_sec1_bytes(key_bytes)
                .map_err(malformed_key("ECDSA"))?;
            let signature = p521::ecdsa::Signature::from_der(der_signature)
                .map_err(malformed_signature("ECDSA"))?;
            key.verify_prehash(&pad_prehash(digest, 66), &signature)
        }
        EcCurve::Other(oid) => {
            tracing::debug!(curve = %oid, "unsupported elliptic curve");
            return Ok(false);
        }
    };

    Ok(verified.is_ok())
}

/// Left-pad a digest shorter than half the field size.
///
/// ECDSA reads a short digest as a plain integer, so leading zeros keep its
/// value while meeting the verifier's minimum prehash length.
fn pad_prehash(digest: Vec<u8>, field_len: usize) -> Vec<u8> {
    let min_len = field_len / 2;
    if digest.len() >= min_len {
        return digest;
    }

    let mut padded = vec![0u8; min_len - digest.len()];
    padded.extend_from_slice(&digest);
    padded
}

fn verify_dsa(
    hash: HashAlgorithm,
    spki_der: &[u8],
    subject: &Certificate,
) -> Result<bool, SignatureError> {
    let key = dsa::VerifyingKey::from_public_key_der(spki_der).map_err(malformed_key("DSA"))?;
    let signature = dsa::Signature::try_from(subject.signature.as_slice())
        .map_err(malformed_signature("DSA"))?;

    let digest = digest_of(hash, &subject.tbs_der);
    Ok(key.verify_prehash(&digest, &signature).is_ok())
}

fn malformed_key<E: Display>(algorithm: &'static str) -> impl Fn(E) -> SignatureError {
    move |e| SignatureError::MalformedKey {
        algorithm,
        message: e.to_string(),
    }
}

fn malformed_signature<E: Display>(algorithm: &'static str) -> impl Fn(E) -> SignatureError {
    move |e| SignatureError::MalformedSignature {
        algorithm,
        message: e.to_string(),
    }
}

fn digest_of(hash: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    match hash {
        HashAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
        HashAlgorithm::Sha224 => Sha224::digest(data).to_vec(),
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}
