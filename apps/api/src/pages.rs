//! Minimal server-rendered pages.
//!
//! The admin panel is a handful of plain HTML pages; no template engine,
//! just small builder functions. Every user-supplied value goes through
//! [`escape`] before landing in markup.

use chrono::{DateTime, Utc};
use portaria_application::AccessReport;
use portaria_domain::{AccessDecision, Event};

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head><meta charset=\"utf-8\">\
         <title>{title} — Portaria</title></head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape(title),
    )
}

/// Public submission form, optionally with the decision for the last
/// submission.
pub fn index(decision: Option<&AccessDecision>) -> String {
    let mut body = String::new();

    if let Some(decision) = decision {
        let status = decision.status.as_str();
        body.push_str(&format!("<p><strong>Acesso {status}!</strong></p>\n"));
    }

    // Shown on every render; all false before the first submission.
    let (vip_match, ticket_match, cpf_valid) = decision.map_or((false, false, false), |d| {
        (d.vip_match, d.ticket_match, d.cpf_valid)
    });
    body.push_str(&format!(
        "<p>Lógica usada: (p: {vip_match}, q: {ticket_match}, r: {cpf_valid})</p>\n"
    ));

    body.push_str(
        "<form method=\"post\" action=\"/\">\n\
         <label>Nome <input name=\"nome\" required></label><br>\n\
         <label>Ingresso <input name=\"ingresso\" required></label><br>\n\
         <label>CPF <input name=\"cpf\" required></label><br>\n\
         <button type=\"submit\">Validar acesso</button>\n</form>\n",
    );

    layout("Controle de Acesso", &body)
}

/// Admin login form, optionally with an inline error.
pub fn login(error: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(error) = error {
        body.push_str(&format!("<p class=\"erro\">{}</p>\n", escape(error)));
    }
    body.push_str(
        "<form method=\"post\" action=\"/login\">\n\
         <label>Usuário <input name=\"usuario\" required></label><br>\n\
         <label>Senha <input name=\"senha\" type=\"password\" required></label><br>\n\
         <button type=\"submit\">Entrar</button>\n</form>\n",
    );
    layout("Login", &body)
}

/// Access report table with aggregate counters; scoped to one event when
/// `event` is given.
pub fn report(report: &AccessReport, event: Option<&Event>) -> String {
    let mut body = String::new();

    if let Some(event) = event {
        body.push_str(&format!("<h2>Evento: {}</h2>\n", escape(&event.name)));
    }

    body.push_str(&format!(
        "<p>Total: {} — Liberados: {} — Negados: {}</p>\n",
        report.total, report.admitted, report.denied
    ));

    body.push_str("<table border=\"1\">\n<tr><th>Nome</th><th>CPF</th><th>Data</th><th>Status</th>");
    if report.includes_reason {
        body.push_str("<th>Motivo</th>");
    }
    body.push_str("</tr>\n");

    for record in &report.records {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
            escape(&record.name),
            escape(&record.cpf),
            escape(&record.timestamp),
            escape(&record.status),
        ));
        if report.includes_reason {
            body.push_str(&format!(
                "<td>{}</td>",
                escape(record.reason.as_deref().unwrap_or(""))
            ));
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</table>\n");

    body.push_str(
        "<p><a href=\"/exportar_csv\">Exportar CSV</a> | \
         <a href=\"/controle\">Eventos</a> | <a href=\"/logout\">Sair</a></p>\n\
         <form method=\"post\" action=\"/limpar_registros\">\
         <button type=\"submit\">Limpar registros</button></form>\n",
    );

    layout("Relatório de Acessos", &body)
}

/// Event list for the admin control panel.
pub fn controle(events: &[Event], now: DateTime<Utc>) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "<p>Agora: {}</p>\n<p><a href=\"/evento/criar\">Criar evento</a> | \
         <a href=\"/relatorio\">Relatório</a></p>\n",
        now.format("%Y-%m-%d %H:%M")
    ));

    body.push_str("<table border=\"1\">\n<tr><th>Nome</th><th>Início</th><th>Fim</th><th>Local</th><th></th></tr>\n");
    for event in events {
        body.push_str(&format!(
            "<tr><td><a href=\"/evento/{id}\">{name}</a></td><td>{start}</td><td>{end}</td>\
             <td>{location}</td>\
             <td><form method=\"post\" action=\"/evento/{id}/apagar\">\
             <button type=\"submit\">Apagar</button></form></td></tr>\n",
            id = event.id,
            name = escape(&event.name),
            start = event.starts_at.format("%Y-%m-%d %H:%M"),
            end = event.ends_at.format("%Y-%m-%d %H:%M"),
            location = escape(event.location.as_deref().unwrap_or("")),
        ));
    }
    body.push_str("</table>\n");

    layout("Controle de Eventos", &body)
}

/// Event creation form.
pub fn create_event() -> String {
    layout(
        "Criar Evento",
        "<form method=\"post\" action=\"/evento/criar\">\n\
         <label>Nome <input name=\"nome\" required></label><br>\n\
         <label>Início <input name=\"data_inicio\" type=\"datetime-local\" required></label><br>\n\
         <label>Fim <input name=\"data_fim\" type=\"datetime-local\" required></label><br>\n\
         <label>Local <input name=\"local\"></label><br>\n\
         <label>Descrição <textarea name=\"descricao\"></textarea></label><br>\n\
         <button type=\"submit\">Criar</button>\n</form>\n\
         <p><a href=\"/controle\">Voltar</a></p>\n",
    )
}
