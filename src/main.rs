use anyhow::{Context, Result};
use textbook_rsa::rand_core::OsRng;
use textbook_rsa::{PrivateKeyParts, RsaPrivateKey, RsaPublicKey, DEFAULT_PRIME_BITS};

const MESSAGE: &str = "O VALTER O BYTHQIM";

fn main() -> Result<()> {
    let mut rng = OsRng;

    let private_key =
        RsaPrivateKey::new(&mut rng, DEFAULT_PRIME_BITS).context("failed to generate a key")?;
    let public_key = RsaPublicKey::from(&private_key);

    let [p, q] = private_key.primes() else {
        anyhow::bail!("key does not hold exactly two primes");
    };
    println!("Prime p: {}", p);
    println!("Prime q: {}", q);

    let ciphertext = public_key
        .encrypt_int(&textbook_rsa::codec::message_to_int(MESSAGE.as_bytes()))
        .context("failed to encrypt")?;
    println!("Encrypted Message: {}", ciphertext);

    let decrypted = private_key
        .decrypt_int(&ciphertext)
        .context("failed to decrypt")?;
    let decrypted = String::from_utf8(textbook_rsa::codec::int_to_bytes(&decrypted))
        .context("decrypted message is not valid UTF-8")?;
    println!("Decrypted Message: {}", decrypted);

    Ok(())
}
