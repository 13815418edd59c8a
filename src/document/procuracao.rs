//! Generator for the power of attorney (Procuração).

use serde::Deserialize;
use std::path::PathBuf;
use utoipa::ToSchema;

use super::common::{download_stem, text_field};
use super::engine::{DocxRenderEngine, RenderOptions};
use super::traits::{DocumentRequest, Generator, RequestField};
use super::{DocumentError, GeneratedDocument};
use crate::config::AppConfig;

/// Payload of `POST /api/gerar-procuracao`.
#[derive(Debug, Deserialize, Default, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcuracaoRequest {
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "Edinaldo Lima")]
    pub nome_cliente: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "brasileiro")]
    pub nacionalidade_cliente: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "empresário")]
    pub profissao: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "20000000000001")]
    pub cnpj: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "Rua X, 531, Caruaru/PE")]
    pub endereco_cliente: String,
    /// Name of the attorney being granted powers
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "Magna Barbosa")]
    pub beneficiario: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "brasileira")]
    pub nacionalidade_advogado: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "26.600")]
    pub oab: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "Av. Agamenon Magalhães, 444, Caruaru/PE")]
    pub endereco_advogado: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "Lima Comércio LTDA")]
    pub nome_empresa: String,
    #[serde(default, deserialize_with = "text_field")]
    #[schema(example = "2024-10-25")]
    pub data: String,
}

impl DocumentRequest for ProcuracaoRequest {
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "nomeCliente",
        "nacionalidadeCliente",
        "profissao",
        "cnpj",
        "enderecoCliente",
        "beneficiario",
        "nacionalidadeAdvogado",
        "oab",
        "enderecoAdvogado",
        "nomeEmpresa",
        "data",
    ];

    fn fields(&self) -> Vec<RequestField<'_>> {
        vec![
            ("nomeCliente", "nome_cliente", self.nome_cliente.as_str()),
            ("nacionalidadeCliente", "nacionalidade_cliente", self.nacionalidade_cliente.as_str()),
            ("profissao", "profissao", self.profissao.as_str()),
            ("cnpj", "cnpj", self.cnpj.as_str()),
            ("enderecoCliente", "endereco_cliente", self.endereco_cliente.as_str()),
            ("beneficiario", "nome_advogado", self.beneficiario.as_str()),
            ("nacionalidadeAdvogado", "nacionalidade_advogado", self.nacionalidade_advogado.as_str()),
            ("oab", "oab", self.oab.as_str()),
            ("enderecoAdvogado", "endereco_advogado", self.endereco_advogado.as_str()),
            ("nomeEmpresa", "nome_empresa", self.nome_empresa.as_str()),
            ("data", "data", self.data.as_str()),
        ]
    }

    fn output_filename(&self) -> String {
        format!(
            "Procuracao_{}.docx",
            download_stem(&self.nome_cliente, "Cliente")
        )
    }
}

/// Generator for the power of attorney.
///
/// Only the body pass runs: placeholders inside text boxes of this template
/// are not filled.
pub struct ProcuracaoGenerator {
    template_path: PathBuf,
}

impl ProcuracaoGenerator {
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.procuracao_template_path())
    }
}

impl Generator<ProcuracaoRequest> for ProcuracaoGenerator {
    fn generate(&self, request: ProcuracaoRequest) -> Result<GeneratedDocument, DocumentError> {
        DocxRenderEngine::generate(&self.template_path, &request, RenderOptions::default())
    }
}
