use super::PlaceRecord;

fn json_for_script_tag(value: &str) -> String {
    value.replace("</", "<\\/")
}

pub fn render_html(records: &[PlaceRecord]) -> Vec<u8> {
    let json = serde_json::to_string(records).unwrap_or_else(|_| "[]".to_string());
    let json = json_for_script_tag(&json);

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>Placeboard</title>
  <script src="https://cdn.tailwindcss.com?plugins=forms,container-queries"></script>
  <link href="https://fonts.googleapis.com/css2?family=Material+Symbols+Outlined:wght,FILL@100..700,0..1&amp;display=swap" rel="stylesheet"/>
  <link href="https://fonts.googleapis.com/css2?family=Montserrat:wght@700;800&amp;family=Inter:wght@400;500;600;700&amp;display=swap" rel="stylesheet"/>
  <script id="tailwind-config">
    tailwind.config = {{
      darkMode: "class",
      theme: {{
        extend: {{
          colors: {{
            "primary": "#135bec",
            "background-light": "#f8fafc",
            "background-dark": "#0f172a"
          }},
          fontFamily: {{
            "sans": ["Inter", "sans-serif"],
            "display": ["Montserrat", "sans-serif"]
          }},
          borderRadius: {{
            "DEFAULT": "0.375rem",
            "lg": "0.5rem",
            "xl": "0.75rem",
            "2xl": "1rem",
            "full": "9999px"
          }}
        }}
      }}
    }};
  </script>
  <style type="text/tailwindcss">
    .material-symbols-outlined {{
      font-variation-settings: 'FILL' 0, 'wght' 400, 'GRAD' 0, 'opsz' 24;
    }}
    body {{
      font-family: 'Inter', sans-serif;
    }}
    h1, h2, h3, .font-bold-display {{
      font-family: 'Montserrat', sans-serif;
      font-weight: 800;
      letter-spacing: -0.025em;
    }}
  </style>
</head>
<body class="bg-background-light dark:bg-background-dark text-slate-900 dark:text-slate-100 min-h-screen transition-colors duration-200">
  <script type="application/json" id="records-data">{json}</script>
  <div class="layout-container flex h-full grow flex-col">
    <header class="flex items-center justify-between border-b border-slate-200 dark:border-slate-800 bg-white dark:bg-slate-900 px-8 py-4 sticky top-0 z-50">
      <div class="flex items-center gap-4">
        <div class="size-10 bg-primary rounded-xl flex items-center justify-center text-white shadow-lg shadow-primary/20">
          <span class="material-symbols-outlined text-[24px]">location_on</span>
        </div>
        <h2 class="text-slate-900 dark:text-white text-xl font-display uppercase tracking-tight">Placeboard</h2>
      </div>
      <div class="flex items-center gap-3">
        <button id="theme-toggle" class="flex size-10 cursor-pointer items-center justify-center overflow-hidden rounded-xl bg-slate-100 dark:bg-slate-800 text-slate-600 dark:text-white hover:bg-slate-200 dark:hover:bg-slate-700 transition-colors" type="button">
          <span id="theme-icon" class="material-symbols-outlined">light_mode</span>
        </button>
      </div>
    </header>

    <main class="flex-1 max-w-[1440px] mx-auto w-full px-8 py-10">
      <div class="flex flex-col md:flex-row justify-between items-start md:items-end mb-10 gap-4">
        <div>
          <h1 class="text-slate-900 dark:text-white text-5xl mb-2">MY PLACES</h1>
          <p class="text-slate-500 dark:text-slate-400 text-base font-medium">Client-side places dashboard (search, filters, pagination).</p>
        </div>
      </div>

      <div class="bg-white dark:bg-slate-900 rounded-2xl border border-slate-200 dark:border-slate-800 p-5 mb-8 shadow-sm">
        <div class="flex flex-wrap items-center justify-between gap-5">
          <div class="flex flex-1 min-w-[320px] items-center gap-3 bg-slate-50 dark:bg-slate-800/50 rounded-xl px-4 py-3 border border-slate-200 dark:border-slate-700 focus-within:border-primary focus-within:ring-2 focus-within:ring-primary/10 transition-all">
            <span class="material-symbols-outlined text-slate-400">search</span>
            <input id="search" class="bg-transparent border-none focus:ring-0 text-sm w-full text-slate-900 dark:text-white placeholder:text-slate-400 font-medium" placeholder="Search places, cities, notes..." type="text"/>
          </div>

          <div class="flex flex-wrap items-center gap-4">
            <div id="filters" class="flex flex-wrap items-center gap-4"></div>

            <div class="h-10 w-px bg-slate-200 dark:bg-slate-700 mx-1 hidden lg:block"></div>

            <div class="flex items-center gap-3">
              <div class="relative">
                <select id="page-size" class="appearance-none bg-slate-50 dark:bg-slate-800/50 border border-slate-200 dark:border-slate-700 rounded-xl text-xs font-bold px-5 py-3 pr-10 text-slate-700 dark:text-slate-300 focus:ring-primary focus:border-primary cursor-pointer transition-all">
                  <option value="12">12 / page</option>
                  <option value="24">24 / page</option>
                  <option value="48">48 / page</option>
                </select>
                <span class="material-symbols-outlined absolute right-3 top-1/2 -translate-y-1/2 text-slate-400 pointer-events-none text-[18px]">expand_more</span>
              </div>

              <div class="flex bg-slate-100 dark:bg-slate-800 p-1 rounded-xl">
                <button id="view-grid" class="flex items-center gap-2 px-4 py-2 rounded-lg bg-white dark:bg-slate-700 shadow-sm text-primary text-xs font-bold transition-all" type="button">
                  <span class="material-symbols-outlined text-[18px]">grid_view</span>
                  GRID
                </button>
                <button id="view-table" class="flex items-center gap-2 px-4 py-2 rounded-lg text-slate-500 dark:text-slate-400 text-xs font-bold hover:text-slate-700 dark:hover:text-slate-200 transition-all" type="button">
                  <span class="material-symbols-outlined text-[18px]">table_chart</span>
                  TABLE
                </button>
              </div>
            </div>
          </div>
        </div>
      </div>

      <noscript>
        <div class="bg-amber-50 dark:bg-amber-900/20 border border-amber-200 dark:border-amber-900/30 rounded-2xl p-5 mb-8">
          <div class="text-amber-800 dark:text-amber-300 font-bold">This dashboard requires JavaScript to render places.</div>
        </div>
      </noscript>

      <div class="bg-white dark:bg-slate-900 border border-slate-200 dark:border-slate-800 rounded-2xl overflow-hidden shadow-sm">
        <div id="table-view" class="hidden overflow-x-auto">
          <table class="w-full text-left border-collapse">
            <thead>
              <tr class="bg-slate-50 dark:bg-slate-800/50 border-b border-slate-200 dark:border-slate-800">
                <th class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest">Place</th>
                <th class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest">City</th>
                <th class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest">Category</th>
                <th class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest">Tags</th>
                <th class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest">Cuisine</th>
                <th class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest">Rating</th>
                <th class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest">Price</th>
                <th class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest">Status</th>
                <th class="px-6 py-5 text-[11px] font-display text-slate-900 dark:text-slate-200 uppercase tracking-widest text-right">Visited On</th>
              </tr>
            </thead>
            <tbody id="table-body" class="divide-y divide-slate-100 dark:divide-slate-800"></tbody>
          </table>
        </div>

        <div id="grid-view" class="p-6">
          <div id="grid-cards" class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-5"></div>
        </div>

        <div class="px-8 py-5 border-t border-slate-100 dark:border-slate-800 bg-slate-50 dark:bg-slate-800/50 flex flex-col md:flex-row items-start md:items-center justify-between gap-4">
          <div class="flex flex-col gap-1">
            <p id="results-total" class="text-sm text-slate-500 dark:text-slate-400 font-bold">0 PLACES</p>
            <p id="results-range" class="text-xs text-slate-500 dark:text-slate-400 font-medium">Showing 0-0</p>
          </div>
          <div class="flex items-center gap-2">
            <button id="page-prev" class="flex items-center justify-center size-9 rounded-lg hover:bg-slate-200 dark:hover:bg-slate-700 text-slate-600 dark:text-slate-300 transition-colors border border-slate-200 dark:border-slate-700" type="button">
              <span class="material-symbols-outlined text-[20px]">chevron_left</span>
            </button>
            <div id="page-buttons" class="flex gap-2"></div>
            <button id="page-next" class="flex items-center justify-center size-9 rounded-lg hover:bg-slate-200 dark:hover:bg-slate-700 text-slate-600 dark:text-slate-300 transition-colors border border-slate-200 dark:border-slate-700" type="button">
              <span class="material-symbols-outlined text-[20px]">chevron_right</span>
            </button>
          </div>
        </div>
      </div>
    </main>

    <footer class="mt-auto py-8 border-t border-slate-200 dark:border-slate-800 text-center">
      <p class="text-xs font-bold text-slate-400 dark:text-slate-500 uppercase tracking-widest">PLACEBOARD</p>
    </footer>
  </div>

  <script>
    (function() {{
      function escapeHtml(value) {{
        return String(value)
          .replaceAll('&', '&amp;')
          .replaceAll('<', '&lt;')
          .replaceAll('>', '&gt;')
          .replaceAll('"', '&quot;')
          .replaceAll("'", '&#39;');
      }}

      function starsHtml(rating) {{
        if (rating === null || rating === undefined) {{
          return '<span class="text-slate-400 italic text-xs font-bold">UNRATED</span>';
        }}
        const v = Number(rating);
        let out = '';
        for (let i = 1; i <= 5; i++) {{
          if (v >= i) {{
            out += '<span class="material-symbols-outlined text-[18px] text-amber-400" style="font-variation-settings: \'FILL\' 1">star</span>';
          }} else if (v >= i - 0.5) {{
            out += '<span class="material-symbols-outlined text-[18px] text-amber-400" style="font-variation-settings: \'FILL\' 1">star_half</span>';
          }} else {{
            out += '<span class="material-symbols-outlined text-[18px] text-slate-300 dark:text-slate-600">star</span>';
          }}
        }}
        return `<span class="flex items-center" title="${{v}}/5">${{out}}</span>`;
      }}

      function visitedLabel(v) {{
        return v ? 'VISITED' : 'TO VISIT';
      }}

      function visitedClass(v) {{
        return v
          ? 'bg-emerald-100/50 dark:bg-emerald-900/20 text-emerald-700 dark:text-emerald-400'
          : 'bg-slate-100 dark:bg-slate-800 text-slate-700 dark:text-slate-300';
      }}

      function chip(text) {{
        return `<span class="bg-slate-100 dark:bg-slate-800 text-slate-700 dark:text-slate-300 px-3 py-1 rounded-lg text-xs font-bold border border-slate-200 dark:border-slate-700">${{escapeHtml(text)}}</span>`;
      }}

      function mapsUrl(r) {{
        const q = (r.address && r.address.trim()) ? r.address : [r.place, r.city || ''].join(' ');
        return 'https://www.google.com/maps/search/?api=1&query=' + encodeURIComponent(q.trim());
      }}

      function uniqueSorted(values) {{
        const s = new Set();
        for (const v of values) {{
          const t = String(v || '').trim();
          if (!t) continue;
          s.add(t);
        }}
        const out = Array.from(s);
        out.sort((a, b) => a.localeCompare(b));
        return out;
      }}

      function createSelect(id, label, values) {{
        const wrapper = document.createElement('div');
        wrapper.className = 'relative';
        wrapper.id = `filter-wrapper-${{id}}`;

        const select = document.createElement('select');
        select.id = `filter-${{id}}`;
        select.className = 'appearance-none bg-slate-50 dark:bg-slate-800/50 border border-slate-200 dark:border-slate-700 rounded-xl text-xs font-bold px-5 py-3 pr-10 text-slate-700 dark:text-slate-300 focus:ring-primary focus:border-primary cursor-pointer transition-all';

        const any = document.createElement('option');
        any.value = '';
        any.textContent = `${{label}}: ALL`;
        select.appendChild(any);

        for (const v of values) {{
          const opt = document.createElement('option');
          opt.value = v;
          opt.textContent = v;
          select.appendChild(opt);
        }}

        const icon = document.createElement('span');
        icon.className = 'material-symbols-outlined absolute right-3 top-1/2 -translate-y-1/2 text-slate-400 pointer-events-none text-[18px]';
        icon.textContent = 'expand_more';

        wrapper.appendChild(select);
        wrapper.appendChild(icon);
        return wrapper;
      }}

      const raw = document.getElementById('records-data').textContent || '[]';
      const records = JSON.parse(raw);

      const htmlEl = document.documentElement;
      const themeIcon = document.getElementById('theme-icon');
      function setTheme(mode) {{
        if (mode === 'dark') {{
          htmlEl.classList.add('dark');
          themeIcon.textContent = 'dark_mode';
        }} else {{
          htmlEl.classList.remove('dark');
          themeIcon.textContent = 'light_mode';
        }}
        localStorage.setItem('plb-theme', mode);
      }}
      const storedTheme = localStorage.getItem('plb-theme');
      if (storedTheme === 'dark' || storedTheme === 'light') {{
        setTheme(storedTheme);
      }} else {{
        setTheme(window.matchMedia && window.matchMedia('(prefers-color-scheme: dark)').matches ? 'dark' : 'light');
      }}
      document.getElementById('theme-toggle').addEventListener('click', function() {{
        setTheme(htmlEl.classList.contains('dark') ? 'light' : 'dark');
      }});

      const tableBody = document.getElementById('table-body');
      const gridCards = document.getElementById('grid-cards');
      const resultsTotal = document.getElementById('results-total');
      const resultsRange = document.getElementById('results-range');
      const pageButtons = document.getElementById('page-buttons');
      const pagePrev = document.getElementById('page-prev');
      const pageNext = document.getElementById('page-next');
      const searchEl = document.getElementById('search');
      const pageSizeEl = document.getElementById('page-size');
      const viewTable = document.getElementById('view-table');
      const viewGrid = document.getElementById('view-grid');
      const tableView = document.getElementById('table-view');
      const gridView = document.getElementById('grid-view');
      const filtersHost = document.getElementById('filters');

      const state = {{
        query: '',
        page: 1,
        pageSize: Number(pageSizeEl.value || 12),
        view: localStorage.getItem('plb-view') || 'grid',
        filters: {{
          city: '',
          category: '',
          tag: '',
          cuisine: '',
          price: '',
          visited: ''
        }}
      }};

      function applyView(next) {{
        state.view = next;
        localStorage.setItem('plb-view', next);
        if (next === 'table') {{
          gridView.classList.add('hidden');
          tableView.classList.remove('hidden');
          viewTable.className = 'flex items-center gap-2 px-4 py-2 rounded-lg bg-white dark:bg-slate-700 shadow-sm text-primary text-xs font-bold transition-all';
          viewGrid.className = 'flex items-center gap-2 px-4 py-2 rounded-lg text-slate-500 dark:text-slate-400 text-xs font-bold hover:text-slate-700 dark:hover:text-slate-200 transition-all';
        }} else {{
          tableView.classList.add('hidden');
          gridView.classList.remove('hidden');
          viewGrid.className = 'flex items-center gap-2 px-4 py-2 rounded-lg bg-white dark:bg-slate-700 shadow-sm text-primary text-xs font-bold transition-all';
          viewTable.className = 'flex items-center gap-2 px-4 py-2 rounded-lg text-slate-500 dark:text-slate-400 text-xs font-bold hover:text-slate-700 dark:hover:text-slate-200 transition-all';
        }}
      }}

      viewTable.addEventListener('click', function() {{ applyView('table'); render(); }});
      viewGrid.addEventListener('click', function() {{ applyView('grid'); render(); }});
      applyView(state.view === 'table' ? 'table' : 'grid');

      const allCity = uniqueSorted(records.map(r => r.city));
      const allCategory = uniqueSorted(records.map(r => r.category));
      const allTags = uniqueSorted(records.flatMap(r => (r.sub_categories || [])));
      const allCuisine = uniqueSorted(records.flatMap(r => (r.cuisines || [])));
      const allPrice = uniqueSorted(records.map(r => r.price_range));

      function addFilter(id, label, values) {{
        if (!values || values.length <= 1) return;
        const wrapper = createSelect(id, label, values);
        const select = wrapper.querySelector('select');
        select.addEventListener('change', function() {{
          state.filters[id] = select.value;
          state.page = 1;
          render();
        }});
        filtersHost.appendChild(wrapper);
      }}

      addFilter('city', 'CITY', allCity);
      addFilter('category', 'CATEGORY', allCategory);
      addFilter('tag', 'TAG', allTags);
      addFilter('cuisine', 'CUISINE', allCuisine);
      addFilter('price', 'PRICE', allPrice);
      addFilter('visited', 'STATUS', ['VISITED', 'TO VISIT']);

      function norm(s) {{ return String(s || '').toLowerCase(); }}
      function includesAny(haystack, needle) {{
        if (!needle) return true;
        return norm(haystack).includes(needle);
      }}

      function recordMatchesFilters(r) {{
        const q = norm(state.query.trim());
        if (q) {{
          const tags = (r.sub_categories || []).join(' ');
          const cuisines = (r.cuisines || []).join(' ');
          const combined = [
            r.place, r.city, r.category, r.notes, r.pros, r.cons,
            r.address, tags, cuisines
          ].join(' ');
          if (!includesAny(combined, q)) return false;
        }}

        if (state.filters.city) {{
          if (String(r.city || '') !== state.filters.city) return false;
        }}
        if (state.filters.category) {{
          if (String(r.category || '') !== state.filters.category) return false;
        }}
        if (state.filters.tag) {{
          const list = (r.sub_categories || []).map(t => String(t));
          if (!list.includes(state.filters.tag)) return false;
        }}
        if (state.filters.cuisine) {{
          const list = (r.cuisines || []).map(c => String(c));
          if (!list.includes(state.filters.cuisine)) return false;
        }}
        if (state.filters.price) {{
          if (String(r.price_range || '') !== state.filters.price) return false;
        }}
        if (state.filters.visited) {{
          const wantVisited = state.filters.visited === 'VISITED';
          if (Boolean(r.visited) !== wantVisited) return false;
        }}

        return true;
      }}

      function renderTable(items) {{
        const rows = [];
        for (const r of items) {{
          const nameCell = r.social
            ? `<a class="text-primary hover:underline" href="${{escapeHtml(r.social)}}" target="_blank" rel="noreferrer">${{escapeHtml(r.place)}}</a>`
            : escapeHtml(r.place);
          const tags = (r.sub_categories || []).join(', ');
          const cuisines = (r.cuisines || []).join(', ');

          rows.push(
            `<tr class="hover:bg-slate-50 dark:hover:bg-slate-800/30 transition-colors">
              <td class="px-6 py-5 text-sm font-semibold text-slate-900 dark:text-white">${{nameCell}}</td>
              <td class="px-6 py-5 text-sm font-medium text-slate-600 dark:text-slate-400">${{escapeHtml(r.city || '')}}</td>
              <td class="px-6 py-5">${{r.category ? chip(r.category) : ''}}</td>
              <td class="px-6 py-5 text-sm font-medium text-slate-600 dark:text-slate-400">${{escapeHtml(tags)}}</td>
              <td class="px-6 py-5 text-sm font-medium text-slate-600 dark:text-slate-400">${{escapeHtml(cuisines)}}</td>
              <td class="px-6 py-5">${{starsHtml(r.rating)}}</td>
              <td class="px-6 py-5 text-sm font-bold text-slate-900 dark:text-white">${{escapeHtml(r.price_range || '')}}</td>
              <td class="px-6 py-5"><span class="${{visitedClass(r.visited)}} px-3 py-1 rounded-lg text-xs font-bold">${{visitedLabel(r.visited)}}</span></td>
              <td class="px-6 py-5 text-sm font-medium text-slate-600 dark:text-slate-400 whitespace-nowrap text-right">${{escapeHtml(r.visit_date || '')}}</td>
            </tr>`
          );
        }}
        tableBody.innerHTML = rows.join('');
      }}

      function renderGrid(items) {{
        const cards = [];
        for (const r of items) {{
          const img = r.pic_url
            ? `<img src="${{escapeHtml(r.pic_url)}}" alt="${{escapeHtml(r.place)}}" class="w-full h-40 object-cover rounded-xl mb-4" loading="lazy"/>`
            : '';
          const subtitle = [r.city, r.category].filter(Boolean).join(' / ');
          const tagChips = (r.sub_categories || []).map(chip).join('');
          const cuisineChips = (r.cuisines || []).map(chip).join('');
          const price = r.price_range
            ? `<span class="text-sm font-bold text-slate-900 dark:text-white">${{escapeHtml(r.price_range)}}</span>`
            : '';
          const reserve = r.reservation
            ? '<span class="bg-amber-100/50 dark:bg-amber-900/20 text-amber-700 dark:text-amber-400 px-3 py-1 rounded-lg text-xs font-bold">RESERVE</span>'
            : '';
          const notes = r.notes
            ? `<div class="mt-3 text-sm text-slate-600 dark:text-slate-400 font-medium">${{escapeHtml(r.notes)}}</div>`
            : '';
          const prosCons = (r.pros || r.cons)
            ? `<div class="mt-3 flex flex-col gap-1 text-sm">
                ${{r.pros ? `<div class="text-emerald-700 dark:text-emerald-400 font-medium">+ ${{escapeHtml(r.pros)}}</div>` : ''}}
                ${{r.cons ? `<div class="text-rose-700 dark:text-rose-400 font-medium">- ${{escapeHtml(r.cons)}}</div>` : ''}}
              </div>`
            : '';
          const links = [];
          if (r.social) {{
            links.push(`<a class="text-primary text-xs font-bold hover:underline" href="${{escapeHtml(r.social)}}" target="_blank" rel="noreferrer">SOCIAL</a>`);
          }}
          links.push(`<a class="text-primary text-xs font-bold hover:underline" href="${{escapeHtml(mapsUrl(r))}}" target="_blank" rel="noreferrer">MAP</a>`);

          cards.push(
            `<div class="rounded-2xl border border-slate-200 dark:border-slate-800 bg-white dark:bg-slate-900 p-5 shadow-sm">
              ${{img}}
              <div class="flex items-start justify-between gap-4">
                <div class="flex flex-col gap-1 min-w-0">
                  <div class="text-slate-900 dark:text-white font-bold">${{escapeHtml(r.place)}}</div>
                  <div class="text-xs text-slate-500 dark:text-slate-400 font-medium">${{escapeHtml(subtitle)}}</div>
                </div>
                <span class="${{visitedClass(r.visited)}} px-3 py-1 rounded-lg text-xs font-bold whitespace-nowrap">${{visitedLabel(r.visited)}}</span>
              </div>
              <div class="mt-3 flex items-center gap-3">
                ${{starsHtml(r.rating)}}
                ${{price}}
                ${{reserve}}
              </div>
              <div class="mt-4 flex flex-wrap gap-2">${{tagChips}}${{cuisineChips}}</div>
              ${{notes}}
              ${{prosCons}}
              <div class="mt-4 flex items-center gap-4">${{links.join('')}}</div>
            </div>`
          );
        }}
        gridCards.innerHTML = cards.join('');
      }}

      function formatWithCommas(n) {{
        const s = String(Number(n || 0));
        return s.replace(/\B(?=(\d{{3}})+(?!\d))/g, ",");
      }}

      function buildPageButtons(page, pageCount) {{
        const buttons = [];
        const maxButtons = 7;

        function btn(p, active) {{
          const cls = active
            ? 'flex items-center justify-center size-9 rounded-lg bg-primary text-white font-display text-xs'
            : 'flex items-center justify-center size-9 rounded-lg hover:bg-slate-200 dark:hover:bg-slate-700 text-slate-600 dark:text-slate-300 transition-colors font-bold text-xs border border-slate-200 dark:border-slate-700';
          return `<button data-page="${{p}}" class="${{cls}}" type="button">${{p}}</button>`;
        }}

        if (pageCount <= maxButtons) {{
          for (let p = 1; p <= pageCount; p++) buttons.push(btn(p, p === page));
          return buttons.join('');
        }}

        const left = Math.max(1, page - 2);
        const right = Math.min(pageCount, page + 2);

        buttons.push(btn(1, page === 1));
        if (left > 2) buttons.push('<div class="flex items-center justify-center size-9 text-slate-400 font-bold">…</div>');
        for (let p = left; p <= right; p++) {{
          if (p === 1 || p === pageCount) continue;
          buttons.push(btn(p, p === page));
        }}
        if (right < pageCount - 1) buttons.push('<div class="flex items-center justify-center size-9 text-slate-400 font-bold">…</div>');
        buttons.push(btn(pageCount, page === pageCount));

        return buttons.join('');
      }}

      function render() {{
        const filtered = records.filter(recordMatchesFilters);
        const total = filtered.length;

        state.pageSize = Number(pageSizeEl.value || 12);
        const pageCount = Math.max(1, Math.ceil(total / state.pageSize));
        state.page = Math.min(Math.max(1, state.page), pageCount);

        const startIdx = (state.page - 1) * state.pageSize;
        const endIdx = Math.min(total, startIdx + state.pageSize);
        const slice = filtered.slice(startIdx, endIdx);

        resultsTotal.textContent = `${{formatWithCommas(total)}} PLACES`;
        resultsRange.textContent = total === 0 ? 'Showing 0-0' : `Showing ${{startIdx + 1}}-${{endIdx}} of ${{formatWithCommas(total)}}`;

        pagePrev.disabled = state.page <= 1;
        pageNext.disabled = state.page >= pageCount;
        pagePrev.classList.toggle('opacity-50', pagePrev.disabled);
        pageNext.classList.toggle('opacity-50', pageNext.disabled);

        pageButtons.innerHTML = buildPageButtons(state.page, pageCount);
        for (const el of pageButtons.querySelectorAll('button[data-page]')) {{
          el.addEventListener('click', function() {{
            state.page = Number(el.getAttribute('data-page') || 1);
            render();
          }});
        }}

        if (state.view === 'table') {{
          renderTable(slice);
        }} else {{
          renderGrid(slice);
        }}
      }}

      pagePrev.addEventListener('click', function() {{
        if (state.page > 1) {{
          state.page -= 1;
          render();
        }}
      }});
      pageNext.addEventListener('click', function() {{
        state.page += 1;
        render();
      }});

      pageSizeEl.addEventListener('change', function() {{
        state.page = 1;
        render();
      }});

      let searchTimer = null;
      searchEl.addEventListener('input', function() {{
        clearTimeout(searchTimer);
        searchTimer = setTimeout(function() {{
          state.query = searchEl.value || '';
          state.page = 1;
          render();
        }}, 80);
      }});

      render();
    }})();
  </script>
</body>
</html>"####,
    );

    html.into_bytes()
}
