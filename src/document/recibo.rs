//! Generator for the fee receipt (Recibo de Honorários).
//!
//! The receipt template keeps the attorney block inside a floating text box,
//! so this is the one document kind that also runs the text-box pass.

use serde::Deserialize;
use std::path::PathBuf;
use utoipa::ToSchema;

use super::common::{download_stem, text_field};
use super::engine::{DocxRenderEngine, RenderOptions};
use super::traits::{DocumentRequest, Generator, RequestField};
use super::{DocumentError, GeneratedDocument};
use crate::config::AppConfig;

/// Payload of `POST /api/gerar-recibo`.
#[derive(Debug, Deserialize, Default, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReciboRequest {
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "211")]
    pub numero_contrato: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "Edinaldo Lima")]
    pub nome_cliente: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "20000000000001")]
    pub cnpj: String,
    /// Name of the attorney receiving the fees
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "Magna Barbosa")]
    pub beneficiario: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "Rua X, 531")]
    pub endereco: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "26.600")]
    pub oab: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "12345678901")]
    pub cpf: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "(81) 99999-9999")]
    pub telefone: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "magna@advogados.com")]
    pub email: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "55.602.020")]
    pub cep: String,
    /// Number of installments; numbers are accepted and stringified
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "3")]
    pub parcelas: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "R$ 1.500")]
    pub valor: String,
    /// ISO date, rendered as DD/MM/YYYY
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "2024-10-25")]
    pub data: String,
    /// Honorific shown before the attorney name (DR, DRA)
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "DRA")]
    pub tratamento: String,
}

impl DocumentRequest for ReciboRequest {
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "numeroContrato",
        "nomeCliente",
        "cnpj",
        "beneficiario",
        "endereco",
        "oab",
        "cpf",
        "telefone",
        "email",
        "cep",
        "parcelas",
        "valor",
        "data",
        "tratamento",
    ];

    fn fields(&self) -> Vec<RequestField<'_>> {
        vec![
            ("numeroContrato", "numero_contrato", self.numero_contrato.as_str()),
            ("nomeCliente", "nome_cliente", self.nome_cliente.as_str()),
            ("cnpj", "cnpj", self.cnpj.as_str()),
            ("beneficiario", "nome_advogado", self.beneficiario.as_str()),
            ("endereco", "endereco", self.endereco.as_str()),
            ("oab", "oab", self.oab.as_str()),
            ("cpf", "cpf", self.cpf.as_str()),
            ("telefone", "telefone", self.telefone.as_str()),
            ("email", "email", self.email.as_str()),
            ("cep", "cep", self.cep.as_str()),
            ("parcelas", "parcelas", self.parcelas.as_str()),
            ("valor", "valor", self.valor.as_str()),
            ("data", "data", self.data.as_str()),
            ("tratamento", "tratamento", self.tratamento.as_str()),
        ]
    }

    fn output_filename(&self) -> String {
        format!(
            "Recibo_de_Honorarios_{}.docx",
            download_stem(&self.numero_contrato, "Recibo")
        )
    }
}

/// Generator for the fee receipt.
pub struct ReciboGenerator {
    template_path: PathBuf,
}

impl ReciboGenerator {
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.recibo_template_path())
    }
}

impl Generator<ReciboRequest> for ReciboGenerator {
    fn generate(&self, request: ReciboRequest) -> Result<GeneratedDocument, DocumentError> {
        let options = RenderOptions {
            patch_text_boxes: true,
        };
        DocxRenderEngine::generate(&self.template_path, &request, options)
    }
}
