//! Embedded single-page UI.
//!
//! Styling decisions (matched-zone highlight, marker color) are made by the
//! server; the page only applies what the check response hands it.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <title>Vérificateur d'espaces TVB</title>
  <link
    rel="stylesheet"
    href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"
    integrity="sha256-p4NxAoJBhIIN+hmNHrzRCf9tD/miZyoHS5obTRR9BMY="
    crossorigin=""
  />
  <style>
    html, body { margin: 0; padding: 0; font-family: sans-serif; background: #fafafa; }
    h1 { font-size: 1.4em; margin: 16px; }
    #layout { display: flex; gap: 16px; margin: 0 16px 16px 16px; }
    #sidebar { flex: 1; min-width: 260px; }
    #content { flex: 3; }
    .panel {
      background: white;
      border: 1px solid #ddd;
      border-radius: 4px;
      padding: 12px;
      margin-bottom: 12px;
    }
    .panel h2 { font-size: 1.1em; margin-top: 0; }
    label { display: block; margin: 6px 0 2px 0; }
    input[type=text], input[type=number] { width: 95%; padding: 4px; }
    button { margin-top: 8px; padding: 6px 12px; cursor: pointer; }
    #map { height: 500px; width: 100%; border: 1px solid #ddd; display: none; }
    .banner { padding: 8px; border-radius: 4px; margin: 8px 0; display: none; }
    .banner.success { background: #E8F5E9; border: 1px solid #4CAF50; }
    .banner.warning { background: #FFF8E1; border: 1px solid #FFB300; }
    .banner.error { background: #FFEBEE; border: 1px solid #E53935; }
    table { border-collapse: collapse; margin: 8px 0; }
    th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }
    footer { margin: 16px; color: #666; font-size: 0.9em; }
  </style>
</head>
<body>
  <h1>Vérificateur d'espaces TVB (Trame Vert Bleu)</h1>

  <div id="layout">
    <div id="sidebar">
      <div class="panel">
        <h2>Chargement des données</h2>
        <label for="datasetFile">Fichier GeoJSON des TVB</label>
        <input type="file" id="datasetFile" accept=".geojson,.json" />
        <div id="datasetStatus" class="banner"></div>
      </div>
    </div>

    <div id="content">
      <div class="panel">
        <h2>Vérification</h2>
        <button id="resetButton" title="Réinitialiser les champs et effacer les résultats">&#128260; Nouvelle recherche</button>

        <label>Mode</label>
        <label><input type="radio" name="mode" value="address" checked /> Adresse</label>
        <label><input type="radio" name="mode" value="coordinates" /> Coordonnées</label>

        <div id="addressControls">
          <label for="addressInput">Entrez une adresse</label>
          <input type="text" id="addressInput" />
        </div>

        <div id="coordinateControls" style="display: none;">
          <label for="latInput">Latitude</label>
          <input type="number" id="latInput" step="0.000001" />
          <label for="lonInput">Longitude</label>
          <input type="number" id="lonInput" step="0.000001" />
        </div>

        <button id="checkButton">Vérifier</button>

        <div id="pointInfo" style="display: none; margin-top: 8px;"></div>
        <div id="resultBanner" class="banner"></div>
        <div id="zoneInfo" style="display: none;">
          <h2>Informations sur la zone</h2>
          <table>
            <thead><tr><th>Propriété</th><th>Valeur</th></tr></thead>
            <tbody id="zoneInfoRows"></tbody>
          </table>
        </div>
      </div>

      <div class="panel">
        <h2>Carte</h2>
        <div id="map"></div>
      </div>
    </div>
  </div>

  <footer>
    Cette application vérifie si une adresse ou des coordonnées GPS sont
    situées dans un espace Trame Vert Bleu (TVB).
  </footer>

  <script
    src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"
    integrity="sha256-20nQCchB9co0qIjJZRGuk2/Z9VM+kNiyxNV1lvTlZBo="
    crossorigin=""
  ></script>

  <script>
    const datasetFile = document.getElementById('datasetFile');
    const datasetStatus = document.getElementById('datasetStatus');
    const addressInput = document.getElementById('addressInput');
    const latInput = document.getElementById('latInput');
    const lonInput = document.getElementById('lonInput');
    const pointInfo = document.getElementById('pointInfo');
    const resultBanner = document.getElementById('resultBanner');
    const zoneInfo = document.getElementById('zoneInfo');
    const zoneInfoRows = document.getElementById('zoneInfoRows');

    let map = null;
    let overlays = null;

    function currentMode() {
      return document.querySelector('input[name=mode]:checked').value;
    }

    function showBanner(el, kind, text) {
      el.className = 'banner ' + kind;
      el.textContent = text;
      el.style.display = 'block';
    }

    function clearResults() {
      pointInfo.style.display = 'none';
      resultBanner.style.display = 'none';
      zoneInfo.style.display = 'none';
      zoneInfoRows.innerHTML = '';
      if (overlays) overlays.clearLayers();
      document.getElementById('map').style.display = 'none';
    }

    function applySession(session) {
      addressInput.value = session.last_address;
      latInput.value = session.last_lat.toFixed(6);
      lonInput.value = session.last_lon.toFixed(6);
    }

    // Mode selector
    document.querySelectorAll('input[name=mode]').forEach((radio) => {
      radio.addEventListener('change', () => {
        const address = currentMode() === 'address';
        document.getElementById('addressControls').style.display = address ? 'block' : 'none';
        document.getElementById('coordinateControls').style.display = address ? 'none' : 'block';
      });
    });

    // Dataset upload
    datasetFile.addEventListener('change', async () => {
      const file = datasetFile.files[0];
      if (!file) return;
      const body = await file.text();
      const response = await fetch('/api/dataset', { method: 'POST', body });
      if (response.ok) {
        const data = await response.json();
        showBanner(datasetStatus, 'success', data.zones + ' zones détectées');
      } else {
        showBanner(datasetStatus, 'error', 'Erreur: ' + await response.text());
      }
    });

    // Check
    document.getElementById('checkButton').addEventListener('click', async () => {
      clearResults();

      const mode = currentMode();
      const payload = { mode };
      if (mode === 'address') {
        if (!addressInput.value.trim()) return;
        payload.address = addressInput.value.trim();
      } else {
        payload.lat = parseFloat(latInput.value);
        payload.lon = parseFloat(lonInput.value);
      }

      const response = await fetch('/api/check', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(payload),
      });

      if (!response.ok) {
        showBanner(resultBanner, 'error', await response.text());
        return;
      }

      const data = await response.json();
      applySession(data.session);

      pointInfo.textContent = 'Coordonnées: ' + data.point.lat + ', ' + data.point.lon;
      pointInfo.style.display = 'block';

      if (data.matched) {
        const text = mode === 'address'
          ? '✅ Cette adresse est située dans une TVB'
          : '✅ Ces coordonnées sont dans une TVB';
        showBanner(resultBanner, 'success', text);
        for (const [key, value] of Object.entries(data.attributes)) {
          const row = document.createElement('tr');
          const keyCell = document.createElement('td');
          const valueCell = document.createElement('td');
          keyCell.textContent = key;
          valueCell.textContent = value === null ? '' : String(value);
          row.appendChild(keyCell);
          row.appendChild(valueCell);
          zoneInfoRows.appendChild(row);
        }
        zoneInfo.style.display = 'block';
      } else {
        const text = mode === 'address'
          ? '❌ Cette adresse n’est pas dans une TVB'
          : '❌ Ces coordonnées ne sont pas dans une TVB';
        showBanner(resultBanner, 'warning', text);
      }

      renderMap(data);
    });

    function renderMap(data) {
      document.getElementById('map').style.display = 'block';

      if (!map) {
        map = L.map('map');
        L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
          maxZoom: 19,
          attribution: '&copy; OpenStreetMap contributors',
        }).addTo(map);
        overlays = L.layerGroup().addTo(map);
      }

      map.setView([data.point.lat, data.point.lon], 12);
      overlays.clearLayers();

      // Zones first, marker on top
      for (const zone of data.zones) {
        L.geoJSON(zone.feature, { style: zone.style }).addTo(overlays);
      }

      L.circleMarker([data.marker.lat, data.marker.lon], {
        radius: 8,
        color: data.marker.color,
        fillColor: data.marker.color,
        fillOpacity: 0.9,
      }).bindPopup('<b>' + data.marker.popup + '</b>').addTo(overlays);
    }

    // Reset
    document.getElementById('resetButton').addEventListener('click', async () => {
      const response = await fetch('/api/reset', { method: 'POST' });
      if (response.ok) {
        applySession(await response.json());
        clearResults();
      }
    });

    // Populate the form from the saved session
    fetch('/api/session')
      .then((response) => response.json())
      .then(applySession);
  </script>
</body>
</html>
"##;
