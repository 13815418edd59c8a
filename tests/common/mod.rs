//! Shared helpers for the integration tests: docx templates built in memory
//! and written to a temporary directory.
#![allow(dead_code)]

use std::io::{Cursor, Read, Write};

use actix_web::web;
use advocacia_docs_server::attorney::AttorneyDirectory;
use advocacia_docs_server::config::AppConfig;
use advocacia_docs_server::AppState;
use serde_json::{json, Value};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/header1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/><Override PartName="/word/footer1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"/></Types>"#;

const NAMESPACES: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:v="urn:schemas-microsoft-com:vml""#;

pub fn runs(parts: &[&str]) -> String {
    let runs: String = parts
        .iter()
        .map(|p| format!(r#"<w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#, p))
        .collect();
    format!("<w:p>{}</w:p>", runs)
}

pub fn paragraph(text: &str) -> String {
    runs(&[text])
}

/// A floating text box as Word saves it: the DrawingML shape under
/// `mc:Choice` and its VML copy under `mc:Fallback`, each holding one
/// paragraph per entry.
pub fn text_box(paragraphs: &[&[&str]]) -> String {
    let content: String = paragraphs.iter().map(|p| runs(p)).collect();
    format!(
        r#"<w:p><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><wp:anchor><a:graphic><a:graphicData><wps:wsp><wps:txbx><w:txbxContent>{content}</w:txbxContent></wps:txbx></wps:wsp></a:graphicData></a:graphic></wp:anchor></w:drawing></mc:Choice><mc:Fallback><w:pict><v:shape><v:textbox><w:txbxContent>{content}</w:txbxContent></v:textbox></v:shape></w:pict></mc:Fallback></mc:AlternateContent></w:r></w:p>"#
    )
}

pub fn document(inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document {}><w:body>{}<w:sectPr/></w:body></w:document>"#,
        NAMESPACES, inner
    )
}

pub fn header(inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:hdr {}>{}</w:hdr>"#,
        NAMESPACES, inner
    )
}

pub fn footer(inner: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:ftr {}>{}</w:ftr>"#,
        NAMESPACES, inner
    )
}

pub fn docx(parts: &[(&str, String)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(CONTENT_TYPES.as_bytes()).unwrap();
    for (name, content) in parts {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

pub fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut out = String::new();
    file.read_to_string(&mut out).unwrap();
    out
}

/// Receipt template: body placeholders (one split over two runs), the
/// attorney block inside a text box, the contract number in the header and
/// the client in the footer.
pub fn recibo_template() -> Vec<u8> {
    let body = [
        paragraph("RECIBO DE HONORÁRIOS"),
        paragraph("Recebi de {{ nome_cliente }}, CNPJ {{ cnpj }}, a quantia de {{ valor }}"),
        runs(&["em {{ parc", "elas }} parcela(s), referente ao contrato {{numero_contrato}}."]),
        paragraph("Caruaru, {{ data }}"),
        text_box(&[
            &["{{ tratamento }} {{ nome_advogado }}"],
            &["OAB {{ oab }} - CPF {{ cpf }}"],
            &["{{ endereco }}, CEP {{ cep }}"],
            &["{{ telefone }} | {{ email }}"],
            &["{{ ce", "p }}"],
        ]),
    ]
    .concat();

    docx(&[
        ("word/document.xml", document(&body)),
        ("word/header1.xml", header(&paragraph("Contrato nº {{ numero_contrato }}"))),
        ("word/footer1.xml", footer(&runs(&["Cliente: {{ nome_", "cliente }} - {{ email }}"]))),
    ])
}

pub fn procuracao_template() -> Vec<u8> {
    let body = [
        paragraph("PROCURAÇÃO"),
        paragraph(
            "OUTORGANTE: {{ nome_empresa }}, CNPJ {{ cnpj }}, representada por {{ nome_cliente }}, {{ nacionalidade_cliente }}, {{ profissao }}, com endereço em {{ endereco_cliente }}.",
        ),
        paragraph(
            "OUTORGADO(A): {{ nome_advogado }}, {{ nacionalidade_advogado }}, OAB {{ oab }}, {{ endereco_advogado }}.",
        ),
        paragraph("Caruaru, {{ data }}"),
        text_box(&[&["OAB {{ oab }}"]]),
    ]
    .concat();

    docx(&[("word/document.xml", document(&body))])
}

pub struct TestTemplates {
    pub dir: TempDir,
    pub config: AppConfig,
}

/// Write both templates to a fresh directory and point a config at it.
pub fn templates() -> TestTemplates {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("procuracao.docx"), procuracao_template()).unwrap();
    std::fs::write(dir.path().join("recibo.docx"), recibo_template()).unwrap();

    let config = AppConfig {
        template_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    TestTemplates { dir, config }
}

pub fn app_state(config: AppConfig) -> web::Data<AppState> {
    let attorneys = AttorneyDirectory::builtin().unwrap();
    web::Data::new(AppState::new(config, attorneys))
}

pub fn recibo_payload() -> Value {
    json!({
        "numeroContrato": "211",
        "nomeCliente": "Edinaldo Lima",
        "cnpj": "20000000000001",
        "beneficiario": "Magna Barbosa",
        "endereco": "Rua X, 531",
        "oab": "26.600",
        "cpf": "12345678901",
        "telefone": "(81) 99999-9999",
        "email": "magna@advogados.com",
        "cep": "55.602.020",
        "parcelas": 3,
        "valor": "R$ 1.500",
        "data": "2024-10-25",
        "tratamento": "DRA"
    })
}

pub fn procuracao_payload() -> Value {
    json!({
        "nomeCliente": "Edinaldo Lima",
        "nacionalidadeCliente": "brasileiro",
        "profissao": "empresário",
        "cnpj": "20000000000001",
        "enderecoCliente": "Rua X, 531, Caruaru/PE",
        "beneficiario": "Magna Barbosa",
        "nacionalidadeAdvogado": "brasileira",
        "oab": "26.600",
        "enderecoAdvogado": "Av. Agamenon Magalhães, 444",
        "nomeEmpresa": "Lima Comércio LTDA",
        "data": "2024-10-25"
    })
}
