//! Embedded dashboard page served at `/`.
//!
//! Two multi-selects drive `/api/view`; the returned figure goes to plotly.js
//! and the table rows to a plain HTML table. `{{TITLE}}` is replaced on render.

pub fn dashboard_page(title: &str) -> String {
    DASHBOARD_HTML.replace("{{TITLE}}", &escape(title))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <title>{{TITLE}}</title>
  <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
  <style>
    body { font-family: Arial, sans-serif; margin: 0; }
    h1 { text-align: center; }
    .filters { display: flex; margin: 20px; gap: 2%; }
    .filters label { display: block; font-weight: bold; }
    .filters select { width: 100%; min-height: 5em; }
    .filters > div { width: 48%; }
    .content { display: flex; }
    #mexico-map { width: 50%; }
    .table-wrap { width: 50%; padding: 20px; height: 600px; overflow-y: auto; }
    table { border-collapse: collapse; width: 100%; }
    th { background: lightgray; font-weight: bold; }
    th, td { text-align: left; padding: 10px; }
  </style>
</head>
<body>
  <h1>{{TITLE}}</h1>
  <div class="filters">
    <div>
      <label for="place-filter">Poblado:</label>
      <select id="place-filter" multiple></select>
    </div>
    <div>
      <label for="company-filter">Empresa Extractivista:</label>
      <select id="company-filter" multiple></select>
    </div>
  </div>
  <div class="content">
    <div id="mexico-map"></div>
    <div class="table-wrap"><table id="data-table"><thead></thead><tbody></tbody></table></div>
  </div>
  <script>
    const placeSel = document.getElementById('place-filter');
    const companySel = document.getElementById('company-filter');

    function fill(select, values) {
      for (const v of values) {
        const opt = document.createElement('option');
        opt.value = v;
        opt.textContent = v;
        select.appendChild(opt);
      }
    }

    function selected(select, key, params) {
      for (const opt of select.selectedOptions) params.append(key, opt.value);
    }

    function renderTable(table) {
      const head = document.querySelector('#data-table thead');
      const body = document.querySelector('#data-table tbody');
      head.innerHTML = '';
      body.innerHTML = '';
      const tr = document.createElement('tr');
      for (const col of table.columns) {
        const th = document.createElement('th');
        th.textContent = col.name;
        tr.appendChild(th);
      }
      head.appendChild(tr);
      for (const row of table.data) {
        const r = document.createElement('tr');
        for (const col of table.columns) {
          const td = document.createElement('td');
          td.textContent = row[col.id];
          r.appendChild(td);
        }
        body.appendChild(r);
      }
    }

    async function refresh() {
      const params = new URLSearchParams();
      selected(placeSel, 'place', params);
      selected(companySel, 'company', params);
      const resp = await fetch('/api/view?' + params.toString());
      const view = await resp.json();
      Plotly.react('mexico-map', view.figure.data, view.figure.layout);
      renderTable(view.table);
    }

    async function init() {
      const resp = await fetch('/api/options');
      const options = await resp.json();
      fill(placeSel, options.places);
      fill(companySel, options.companies);
      placeSel.addEventListener('change', refresh);
      companySel.addEventListener('change', refresh);
      await refresh();
    }

    init();
  </script>
</body>
</html>
"#;
