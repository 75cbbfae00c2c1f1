use actix_web::{
    web::{self, Data, Json},
    HttpResponse, Scope,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    api::to_http_error,
    core::biometric::FaceDescriptor,
    core::services::{vault::SecretRecord, VaultService},
};

#[derive(Debug, Deserialize)]
pub struct EncryptSecretsRequest {
    pub private_key: String,
    pub mnemonic: String,
    pub descriptor: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct DecryptSecretsRequest {
    #[serde(flatten)]
    pub record: SecretRecord,
    pub descriptor: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyFaceRequest {
    pub reference: Vec<f64>,
    pub probe: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct VerifyFaceResponse {
    pub accepted: bool,
}

pub fn scope() -> Scope {
    web::scope("/vault")
        .service(web::resource("/encrypt").route(web::post().to(encrypt_secrets)))
        .service(web::resource("/decrypt").route(web::post().to(decrypt_secrets)))
        .service(web::resource("/verify").route(web::post().to(verify_face)))
}

async fn encrypt_secrets(
    service: Data<VaultService>,
    request: Json<EncryptSecretsRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    info!("Received secret encryption request");
    let request = request.into_inner();
    let descriptor = FaceDescriptor::new(request.descriptor);

    let record = service
        .encrypt_secrets(&request.private_key, &request.mnemonic, &descriptor)
        .map_err(|e| {
            error!("Secret encryption failed: {}", e);
            to_http_error(e)
        })?;

    Ok(HttpResponse::Created().json(record))
}

async fn decrypt_secrets(
    service: Data<VaultService>,
    request: Json<DecryptSecretsRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    info!("Received secret decryption request");
    let request = request.into_inner();
    let descriptor = FaceDescriptor::new(request.descriptor);

    let secrets = service
        .decrypt_secrets(&request.record, &descriptor)
        .map_err(|e| {
            // Expected on wrong-face attempts; not an operational error.
            warn!("Secret decryption failed: {}", e);
            to_http_error(e)
        })?;

    Ok(HttpResponse::Ok().json(secrets))
}

async fn verify_face(
    service: Data<VaultService>,
    request: Json<VerifyFaceRequest>,
) -> Result<HttpResponse, actix_web::Error> {
    let request = request.into_inner();
    let reference = FaceDescriptor::new(request.reference);
    let probe = FaceDescriptor::new(request.probe);

    let accepted = service.verify_face(&reference, &probe).map_err(|e| {
        error!("Face verification failed: {}", e);
        to_http_error(e)
    })?;

    info!(accepted, "Face verification result");
    Ok(HttpResponse::Ok().json(VerifyFaceResponse { accepted }))
}
