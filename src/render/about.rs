// src/render/about.rs
use std::fmt::Write;

use super::pages::{AUTHOR, CC_BY_SA_URL, CC_BY_URL, REPO_URL};
use crate::core::sanitize::escape_html;

pub fn render_about_page(last_update: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Sobre o projeto</title>
    <style>
        body {{ font-family: Arial, sans-serif; text-align: center; margin: 20px; }}
        .content {{ max-width: 800px; margin: auto; text-align: left; }}
        .footer {{ margin-top: 40px; font-size: 0.9em; color: #555; text-align: center; }}
    </style>
</head>
<body>
    <h2>Sobre o projeto</h2>
    <div class="content">
        <p>Este projeto foi desenvolvido por {AUTHOR} para visualizar as observações de aves no campus da USP utilizando dados do iNaturalist.</p>
        <p>As observações são exibidas em um mapa de calor, juntamente com a primeira e a mais recente observação de cada espécie, bem como uma breve descrição retirada da Wikipedia.</p>
        <p>O código-fonte do projeto está disponível no GitHub: <a href="{REPO_URL}" target="_blank">Repositório no GitHub</a></p>
    </div>
    <div class="footer">
        <p>Licença: <a href="{CC_BY_URL}" target="_blank">CC-BY</a></p>
        <p>Conteúdo da Wikipedia licenciado em <a href="{CC_BY_SA_URL}" target="_blank">CC-BY-SA</a></p>
        <p>Última atualização: {date}</p>
    </div>
</body>
</html>
"#,
        date = escape_html(last_update),
    );
    html
}

pub fn render_readme(last_update: &str) -> String {
    format!(
        "# Visualização de Observações de Aves na USP

Este projeto foi desenvolvido por {AUTHOR} para visualizar as observações de aves no campus da USP utilizando dados do iNaturalist.

## Sobre o projeto

As observações são exibidas em um mapa de calor, juntamente com a primeira e a mais recente observação de cada espécie, bem como uma breve descrição retirada da Wikipedia.

## Licença

O código-fonte deste projeto está licenciado sob a licença [CC-BY]({CC_BY_URL}).

O conteúdo da Wikipedia está licenciado sob a licença [CC-BY-SA]({CC_BY_SA_URL}).

## Última atualização

{last_update}
"
    )
}
