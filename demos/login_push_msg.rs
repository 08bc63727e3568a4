use std::io;

use sms24x7::{
    Credentials, ErrorKind, MessageText, PushOptions, RawPhoneNumber, Sms24x7Client, Sms24x7Error,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let email = std::env::var("SMS24X7_EMAIL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMS24X7_EMAIL environment variable is required",
        )
    })?;
    let password = std::env::var("SMS24X7_PASSWORD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMS24X7_PASSWORD environment variable is required",
        )
    })?;
    // Comma-separated list of recipients.
    let phones = std::env::var("SMS24X7_PHONES").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMS24X7_PHONES environment variable is required",
        )
    })?;
    let phones = phones
        .split(',')
        .map(RawPhoneNumber::new)
        .collect::<Result<Vec<_>, _>>()?;

    let client = Sms24x7Client::new(Credentials::new(email, password)?);
    let result = client
        .login_scoped(|client| async move {
            for phone in phones {
                let text = MessageText::new("multiple SMS demo")?;
                let sent = client
                    .send_message_with_session(phone.clone(), text, PushOptions::default())
                    .await?;
                println!("{}: {} part(s)", phone.raw(), sent.n_raw_sms);
            }
            Ok::<_, Sms24x7Error>(())
        })
        .await;

    match result {
        Err(err) if err.kind() == ErrorKind::SessionExpired => {
            eprintln!("session expired mid-batch; run again to log in afresh");
        }
        other => other?,
    }

    println!("session after scope: {:?}", client.session_cookie());
    Ok(())
}
