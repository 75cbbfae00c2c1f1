use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::biometric::{
    acquire_descriptor, derive_key, verify, DescriptorSource, FaceDescriptor,
};
use crate::core::crypto::{decrypt, encrypt, EncryptedBlob};
use crate::utils::config::BiometricConfig;
use crate::utils::error::{Result, WalletError};

/// At-rest record: the two blobs and their creation timestamp travel and are
/// stored together. Each blob has its own IV; both share the one key derived
/// from the descriptor that sealed them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretRecord {
    pub encrypted_private_key: EncryptedBlob,
    pub encrypted_mnemonic: EncryptedBlob,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DecryptedSecrets {
    pub private_key: String,
    pub mnemonic: String,
}

pub struct VaultService {
    descriptor_length: usize,
    match_threshold: f64,
    capture_deadline: Duration,
}

impl VaultService {
    pub fn new(config: &BiometricConfig) -> Self {
        Self {
            descriptor_length: config.descriptor_length,
            match_threshold: config.match_threshold,
            capture_deadline: config.capture_deadline(),
        }
    }

    /// Every descriptor entering the vault must match the embedding model's
    /// configured length; anything else is a malformed capture, not a face.
    fn check_length(&self, descriptor: &FaceDescriptor) -> Result<()> {
        if descriptor.len() != self.descriptor_length {
            return Err(WalletError::DescriptorLengthMismatch {
                expected: self.descriptor_length,
                actual: descriptor.len(),
            });
        }
        Ok(())
    }

    /// Poll an external capture source until it yields a usable descriptor
    /// or the configured acquisition deadline elapses.
    pub async fn acquire_descriptor(
        &self,
        source: &dyn DescriptorSource,
    ) -> Result<FaceDescriptor> {
        let descriptor = acquire_descriptor(source, self.capture_deadline).await?;
        self.check_length(&descriptor)?;
        Ok(descriptor)
    }

    /// Seal a wallet's private key and mnemonic under the descriptor-derived
    /// key. Opening the record later requires the exact same raw descriptor;
    /// the similarity gate in [`verify_face`](Self::verify_face) does not
    /// loosen this.
    pub fn encrypt_secrets(
        &self,
        private_key: &str,
        mnemonic: &str,
        descriptor: &FaceDescriptor,
    ) -> Result<SecretRecord> {
        self.check_length(descriptor)?;
        let key = derive_key(descriptor);

        let record = SecretRecord {
            encrypted_private_key: encrypt(private_key, &key)?,
            encrypted_mnemonic: encrypt(mnemonic, &key)?,
            created_at: Utc::now(),
        };

        info!("Wallet secrets sealed");
        Ok(record)
    }

    pub fn decrypt_secrets(
        &self,
        record: &SecretRecord,
        descriptor: &FaceDescriptor,
    ) -> Result<DecryptedSecrets> {
        self.check_length(descriptor)?;
        let key = derive_key(descriptor);

        Ok(DecryptedSecrets {
            private_key: decrypt(&record.encrypted_private_key, &key)?,
            mnemonic: decrypt(&record.encrypted_mnemonic, &key)?,
        })
    }

    /// Server-side gate: does the probe belong to the account owner?
    /// Both descriptors must carry the configured length before any distance
    /// is computed; two equally truncated vectors must not slip through.
    pub fn verify_face(
        &self,
        reference: &FaceDescriptor,
        probe: &FaceDescriptor,
    ) -> Result<bool> {
        self.check_length(reference)?;
        self.check_length(probe)?;
        verify(reference, probe, self.match_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::biometric::{DEFAULT_MATCH_THRESHOLD, descriptor::REFERENCE_DESCRIPTOR_LEN};

    fn service() -> VaultService {
        VaultService::new(&BiometricConfig {
            descriptor_length: REFERENCE_DESCRIPTOR_LEN,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            capture_deadline_secs: 0,
        })
    }

    fn descriptor(fill: f64) -> FaceDescriptor {
        FaceDescriptor::new(vec![fill; REFERENCE_DESCRIPTOR_LEN])
    }

    #[test]
    fn seal_and_open_round_trip() {
        let vault = service();
        let d = descriptor(0.25);

        let record = vault
            .encrypt_secrets("0xdeadbeef", "abandon abandon about", &d)
            .unwrap();
        let secrets = vault.decrypt_secrets(&record, &d).unwrap();

        assert_eq!(secrets.private_key, "0xdeadbeef");
        assert_eq!(secrets.mnemonic, "abandon abandon about");
    }

    #[test]
    fn blobs_use_independent_ivs() {
        let vault = service();
        let record = vault
            .encrypt_secrets("same text", "same text", &descriptor(0.25))
            .unwrap();
        assert_ne!(record.encrypted_private_key.iv, record.encrypted_mnemonic.iv);
        assert_ne!(
            record.encrypted_private_key.ciphertext,
            record.encrypted_mnemonic.ciphertext
        );
    }

    #[test]
    fn different_descriptor_cannot_open_record() {
        let vault = service();
        let record = vault
            .encrypt_secrets("0xdeadbeef", "abandon abandon about", &descriptor(0.25))
            .unwrap();

        // Even a tiny descriptor perturbation derives a different key.
        match vault.decrypt_secrets(&record, &descriptor(0.2500001)) {
            Err(WalletError::DecryptionFailed) => {}
            Ok(secrets) => assert_ne!(secrets.private_key, "0xdeadbeef"),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn verify_face_gates_on_distance() {
        let vault = service();
        let reference = descriptor(0.1);

        assert!(vault.verify_face(&reference, &reference).unwrap());
        assert!(!vault.verify_face(&reference, &descriptor(0.3)).unwrap());
    }

    #[test]
    fn truncated_descriptor_cannot_seal_or_open() {
        let vault = service();
        let short = FaceDescriptor::new(vec![0.25; 5]);

        let err = vault.encrypt_secrets("pk", "words", &short).unwrap_err();
        assert!(matches!(
            err,
            WalletError::DescriptorLengthMismatch { expected: 128, actual: 5 }
        ));

        let record = vault
            .encrypt_secrets("pk", "words", &descriptor(0.25))
            .unwrap();
        let err = vault.decrypt_secrets(&record, &short).unwrap_err();
        assert!(matches!(err, WalletError::DescriptorLengthMismatch { .. }));
    }

    #[test]
    fn empty_descriptors_never_verify() {
        let vault = service();
        let empty = FaceDescriptor::new(Vec::new());

        // Two empty vectors are distance zero; the length gate must reject
        // them before any distance check can accept.
        let err = vault.verify_face(&empty, &empty).unwrap_err();
        assert!(matches!(
            err,
            WalletError::DescriptorLengthMismatch { expected: 128, actual: 0 }
        ));
    }

    struct FixedSource(Vec<f64>);

    #[async_trait::async_trait]
    impl DescriptorSource for FixedSource {
        async fn capture(&self) -> Result<Option<FaceDescriptor>> {
            Ok(Some(FaceDescriptor::new(self.0.clone())))
        }
    }

    struct BlankSource;

    #[async_trait::async_trait]
    impl DescriptorSource for BlankSource {
        async fn capture(&self) -> Result<Option<FaceDescriptor>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn acquisition_validates_captured_length() {
        let vault = service();

        let good = vault
            .acquire_descriptor(&FixedSource(vec![0.1; REFERENCE_DESCRIPTOR_LEN]))
            .await
            .unwrap();
        assert_eq!(good.len(), REFERENCE_DESCRIPTOR_LEN);

        let err = vault
            .acquire_descriptor(&FixedSource(vec![0.1; 12]))
            .await
            .unwrap_err();
        assert!(matches!(err, WalletError::DescriptorLengthMismatch { .. }));
    }

    #[tokio::test]
    async fn acquisition_honors_configured_deadline() {
        // capture_deadline_secs = 0: a faceless frame fails immediately.
        let err = service().acquire_descriptor(&BlankSource).await.unwrap_err();
        assert!(matches!(err, WalletError::NoFaceDetected));
    }

    #[test]
    fn record_serde_round_trip() {
        let vault = service();
        let d = descriptor(0.5);
        let record = vault.encrypt_secrets("pk", "words", &d).unwrap();

        let json = serde_json::to_string(&record).unwrap();
        let back: SecretRecord = serde_json::from_str(&json).unwrap();
        let secrets = vault.decrypt_secrets(&back, &d).unwrap();
        assert_eq!(secrets.private_key, "pk");
    }
}
