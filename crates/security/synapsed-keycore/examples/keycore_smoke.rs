//! Smoke-tests a full generate -> encrypt -> decrypt -> sign -> verify
//! -> rotate -> revoke cycle against an in-memory store. Run with
//! `cargo run -p synapsed-keycore --example keycore_smoke`.

use synapsed_keycore::{CoreConfig, KeyCore, KeyPurpose, VerifyTarget};

#[tokio::main]
async fn main() -> synapsed_keycore::Result<()> {
    tracing_subscriber::fmt::init();

    let config = CoreConfig {
        master_secret: Some("smoke-test-master-secret".into()),
        database_path: ":memory:".into(),
        ..CoreConfig::default()
    };
    let core = KeyCore::new(config)?;
    core.initialize().await?;

    let encryption_key = core.generate(KeyPurpose::Encryption, None).await?;
    println!("generated encryption key {}", encryption_key.key_id);

    let ciphertext = core.encrypt(&encryption_key.public_key, b"a message only the key holder should read").await?;
    let plaintext = core.decrypt(&encryption_key.key_id, &ciphertext).await?;
    assert_eq!(plaintext, b"a message only the key holder should read");
    println!("encrypt/decrypt round trip ok ({} ciphertext bytes)", ciphertext.len());

    let signing_key = core.generate(KeyPurpose::Signature, None).await?;
    let signature = core.sign(&signing_key.key_id, b"document body").await?;
    let valid = core.verify(VerifyTarget::KeyId(signing_key.key_id.clone()), b"document body", &signature).await?;
    assert!(valid);
    println!("sign/verify round trip ok ({} signature bytes)", signature.len());

    let rotated = core.rotate(&signing_key.key_id, "admin_requested").await?;
    println!("rotated {} -> {}", signing_key.key_id, rotated.key_id);

    core.revoke(&rotated.key_id, "end of smoke test").await?;
    println!("revoked {}", rotated.key_id);

    let health = core.health().await?;
    println!("health: {} ({} operations recorded)", health.status, health.operations.total_operations);

    core.shutdown().await?;
    Ok(())
}
